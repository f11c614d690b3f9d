use super::figure::{Figure, Trace};
use super::theme;
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

/// Years with fewer priced devices than this are left out.
pub const MIN_DEVICES_PER_YEAR: usize = 10;

pub struct PriceTrend;

impl Chart for PriceTrend {
    fn id(&self) -> &'static str {
        "line_price_trend"
    }

    fn title(&self) -> &'static str {
        "Average Price Trend by Release Year"
    }

    fn x_title(&self) -> &'static str {
        "Release Year"
    }

    fn y_title(&self) -> &'static str {
        "Average Price ($)"
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let years = table.numbers("release_year")?;
        let prices = table.numbers("price")?;

        let (x, y): (Vec<Value>, Vec<f64>) = ops::group_by_number(&years, &prices)
            .into_iter()
            .filter(|group| group.count >= MIN_DEVICES_PER_YEAR)
            .map(|group| (year(group.key), ops::round_to(group.mean, 2)))
            .unzip();

        let trace = Trace::new("scatter")
            .with("x", x)
            .with("y", y)
            .with("mode", "lines+markers")
            .with(
                "line",
                Value::map([("color", Value::from(theme::PRIMARY)), ("width", Value::from(3u32))]),
            )
            .with(
                "marker",
                Value::map([("color", Value::from(theme::PRIMARY)), ("size", Value::from(8u32))]),
            )
            .with("name", "Average Price");

        Ok(Figure::new(theme::layout_for(self).with("showlegend", false)).with_trace(trace))
    }
}

/// Whole years print as integers.
fn year(key: f64) -> Value {
    if key.fract() == 0.0 && key.abs() < 1e15 {
        Value::from(key as i64)
    } else {
        Value::from(ops::round_to(key, 2))
    }
}
