use plotly::common::{Line, Mode};
use plotly::Scatter;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::{chart_layout, plot, ChartProps};

#[function_component(LineChart)]
pub fn line_chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.chart.clone(), props.id.clone()),
        move |(container_ref, chart, div_id)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let trace = Scatter::new(chart.series.categories(), chart.series.values())
                    .mode(Mode::LinesMarkers)
                    .name(&chart.y_axis)
                    .line(Line::new().color("rgb(59, 130, 246)").width(2.0));

                plot(div_id, &trace, &chart_layout(chart));
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} class="chart-container" style="width:100%; height:400px;"></div>
    }
}
