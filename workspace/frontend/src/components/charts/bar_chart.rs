use plotly::Bar;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::{chart_layout, plot, ChartProps};

#[function_component(BarChart)]
pub fn bar_chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.chart.clone(), props.id.clone()),
        move |(container_ref, chart, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let trace = Bar::new(chart.series.categories(), chart.series.values())
                    .name(&chart.y_axis);

                plot(div_id, &trace, &chart_layout(chart));
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} class="chart-container" style="width:100%; height:400px;"></div>
    }
}
