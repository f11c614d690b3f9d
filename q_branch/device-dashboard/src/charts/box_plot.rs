use super::figure::{Figure, Trace};
use super::theme::{self, Margins};
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;

/// Operating systems shown, most common first.
pub const TOP_OPERATING_SYSTEMS: usize = 8;

pub struct PriceByOs;

impl Chart for PriceByOs {
    fn id(&self) -> &'static str {
        "box_price_os"
    }

    fn title(&self) -> &'static str {
        "Price Distribution by Operating System"
    }

    fn x_title(&self) -> &'static str {
        "Operating System"
    }

    fn y_title(&self) -> &'static str {
        "Price ($)"
    }

    fn margins(&self) -> Margins {
        Margins::bottom(100)
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let os = table.text("os")?;
        let prices = table.numbers("price")?;

        let mut figure = Figure::new(theme::layout_for(self));
        for (name, _) in ops::value_counts(os).into_iter().take(TOP_OPERATING_SYSTEMS) {
            let y: Vec<Option<f64>> = os
                .iter()
                .zip(&prices)
                .filter(|(row_os, _)| row_os.as_deref() == Some(name.as_str()))
                .map(|(_, price)| *price)
                .collect();
            figure = figure.with_trace(
                Trace::new("box")
                    .with("y", y)
                    .with("name", name)
                    .with("boxpoints", "outliers"),
            );
        }
        Ok(figure)
    }
}
