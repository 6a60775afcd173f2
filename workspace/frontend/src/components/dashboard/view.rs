use common::view::{render, ChartKind, MainPanel, Widget};
use common::RepositoryCatalog;
use yew::prelude::*;

use crate::common::loading::{Loading, LoadingSize};
use crate::components::charts::{BarChart, LineChart};
use crate::components::image::ImageCard;
use crate::components::layout::layout::Layout;
use crate::hooks::use_dashboard;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub catalog: RepositoryCatalog,
}

fn widget(index: usize, widget: &Widget) -> Html {
    match widget {
        Widget::Chart(chart) => {
            let id = format!("forecast-chart-{}", index);
            match chart.kind {
                ChartKind::Bar => html! { <BarChart {id} chart={chart.clone()} /> },
                ChartKind::Line => html! { <LineChart {id} chart={chart.clone()} /> },
            }
        }
        Widget::Image(image) => html! { <ImageCard image={image.clone()} /> },
        Widget::Heading(text) => html! { <h2 class="text-2xl font-bold mt-6">{ text }</h2> },
        Widget::Divider => html! { <div class="divider"></div> },
    }
}

#[function_component(Dashboard)]
pub fn dashboard(props: &Props) -> Html {
    let (store, on_select) = use_dashboard(props.catalog.clone());
    let view = render(&store.0);

    let main = match &view.main {
        MainPanel::Loading => html! {
            <Loading size={LoadingSize::Large} text={Some(format!("Loading {}...", store.0.selected().label))} />
        },
        MainPanel::Widgets(widgets) => html! {
            <div class="flex flex-col gap-4">
                { for widgets.iter().enumerate().map(|(index, w)| widget(index, w)) }
            </div>
        },
    };

    html! {
        <Layout title={view.title.clone()} items={view.sidebar.clone()} {on_select}>
            { main }
        </Layout>
    }
}
