mod bar_chart;
mod line_chart;

pub use bar_chart::BarChart;
pub use line_chart::LineChart;

use common::view::ChartView;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::Layout;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    /// DOM id of the plot container
    pub id: String,
    pub chart: ChartView,
}

fn chart_layout(chart: &ChartView) -> Layout {
    Layout::new()
        .title(Title::with_text(&chart.title))
        .y_axis(Axis::new().title(Title::with_text(&chart.y_axis)))
        .height(400)
}

/// Convert a value to a plain JS object; maps become objects, not `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Hand a single trace and its layout to Plotly.
fn plot<T: Serialize>(div_id: &str, trace: &T, layout: &Layout) {
    let (trace_js, layout_js) = match (to_js(trace), to_js(layout)) {
        (Ok(trace_js), Ok(layout_js)) => (trace_js, layout_js),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("Failed to convert chart {} for Plotly: {}", div_id, e);
            return;
        }
    };

    let data_js = js_sys::Array::new();
    data_js.push(&trace_js);

    log::trace!("Plotting chart {}", div_id);
    newPlot(div_id, data_js.into(), layout_js);
}
