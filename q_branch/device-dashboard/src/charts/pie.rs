use super::figure::{Figure, Trace};
use super::theme::{self, Margins};
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

const HOVER_TEMPLATE: &str = "%{label}<br>Count: %{value}<br>% of total: %{percent}<extra></extra>";

pub struct DeviceTypes;

impl Chart for DeviceTypes {
    fn id(&self) -> &'static str {
        "pie_device_type"
    }

    fn title(&self) -> &'static str {
        "Distribution of Device Types"
    }

    fn margins(&self) -> Margins {
        Margins {
            l: 60,
            r: 60,
            t: 120,
            b: 80,
        }
    }

    fn plot_background(&self) -> &'static str {
        theme::WHITE
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let counts = ops::value_counts(table.text("device_type")?);
        let colors = &theme::PALETTE[..counts.len().min(theme::PALETTE.len())];
        let (labels, values): (Vec<String>, Vec<usize>) = counts.into_iter().unzip();

        let trace = Trace::new("pie")
            .with("labels", labels)
            .with("values", values)
            .with("hole", 0.35)
            .with("marker", Value::map([("colors", colors)]))
            .with("textinfo", "label+percent+value")
            .with("hovertemplate", HOVER_TEMPLATE);

        Ok(Figure::new(theme::layout_for(self)).with_trace(trace))
    }
}
