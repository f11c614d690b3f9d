//! Price vs performance scatter over a fixed random sample.

use super::figure::{Figure, Trace};
use super::theme;
use super::Chart;
use crate::dataset::schema::PERFORMANCE_SCORE;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

/// Maximum number of plotted points.
pub const SAMPLE_SIZE: usize = 2000;
pub const SAMPLE_SEED: u64 = 42;

pub struct PricePerformance;

impl Chart for PricePerformance {
    fn id(&self) -> &'static str {
        "scatter_price_performance"
    }

    fn title(&self) -> &'static str {
        "Price vs Performance Score"
    }

    fn x_title(&self) -> &'static str {
        "Performance Score"
    }

    fn y_title(&self) -> &'static str {
        "Price ($)"
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let score = table.numbers(PERFORMANCE_SCORE)?;
        let price = table.numbers("price")?;
        let rows = ops::sample_indices(table.row_count(), SAMPLE_SIZE, SAMPLE_SEED);

        let x: Vec<Option<f64>> = rows.iter().map(|&i| score[i]).collect();
        let y: Vec<Option<f64>> = rows.iter().map(|&i| price[i]).collect();

        let trace = Trace::new("scatter")
            .with("x", x)
            .with("y", y)
            .with("mode", "markers")
            .with(
                "marker",
                Value::map([
                    ("color", Value::from(theme::PRIMARY)),
                    ("size", Value::from(6u32)),
                    ("opacity", Value::from(0.6)),
                ]),
            )
            .with("name", "Price vs Performance");

        Ok(Figure::new(theme::layout_for(self).with("showlegend", false)).with_trace(trace))
    }
}
