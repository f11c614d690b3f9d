use super::figure::{Figure, Trace};
use super::theme;
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

pub const BINS: u32 = 50;

pub struct PriceHistogram;

impl Chart for PriceHistogram {
    fn id(&self) -> &'static str {
        "hist_price"
    }

    fn title(&self) -> &'static str {
        "Price Distribution"
    }

    fn x_title(&self) -> &'static str {
        "Price ($)"
    }

    fn y_title(&self) -> &'static str {
        "Frequency"
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let prices = table.numbers("price")?;
        let sorted = ops::sorted_present(&prices);

        let mut trace = Trace::new("histogram")
            .with("x", prices)
            .with("nbinsx", BINS)
            .with("marker", theme::marker(theme::PRIMARY))
            .with("name", "Price Distribution");
        if let (Some(&start), Some(&end)) = (sorted.first(), sorted.last()) {
            trace = trace.with("xbins", bins(start, end));
        }

        Ok(Figure::new(theme::layout_for(self).with("showlegend", false)).with_trace(trace))
    }
}

/// Fifty equal bins covering `[min, max]`; a single-valued range gets one
/// bin of width 1.
///
/// Bins exclude their right edge, so the right edge is nudged past `max`
/// one ulp at a time until the last bin contains it.
fn bins(min: f64, max: f64) -> Value {
    if max <= min {
        return Value::map([("start", min), ("end", min + 1.0), ("size", 1.0)]);
    }
    let count = f64::from(BINS);
    let mut edge = max;
    loop {
        edge = edge.next_up();
        let size = (edge - min) / count;
        let end = min + size * count;
        if end > max {
            return Value::map([("start", min), ("end", end), ("size", size)]);
        }
    }
}
