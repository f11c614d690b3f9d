//! Average-price bar charts.

use super::figure::{Figure, Trace};
use super::theme::{self, Margins};
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

/// Brands shown by the top-brands chart.
pub const TOP_BRANDS: usize = 10;

/// Mean price per category, highest first, labelled in whole dollars.
fn mean_price_bars(
    table: &Table,
    category: &str,
    limit: Option<usize>,
    color: &str,
) -> Result<Trace, ComputeError> {
    let keys = table.text(category)?;
    let prices = table.numbers("price")?;
    let mut means = ops::group_mean(keys, &prices);
    if let Some(limit) = limit {
        means.truncate(limit);
    }

    let labels: Vec<String> = means.iter().map(|(_, mean)| dollars(*mean)).collect();
    let (names, values): (Vec<String>, Vec<f64>) = means.into_iter().unzip();

    Ok(Trace::new("bar")
        .with("x", names)
        .with("y", values)
        .with("marker", theme::marker(color))
        .with("text", labels)
        .with("textposition", "outside"))
}

fn dollars(value: f64) -> String {
    if value.is_nan() {
        "$nan".to_string()
    } else {
        format!("${:.0}", value)
    }
}

pub struct TopBrands;

impl Chart for TopBrands {
    fn id(&self) -> &'static str {
        "bar_top_brands"
    }

    fn title(&self) -> &'static str {
        "Top 10 Brands with Highest Average Price"
    }

    fn x_title(&self) -> &'static str {
        "Brand"
    }

    fn y_title(&self) -> &'static str {
        "Average Price ($)"
    }

    fn margins(&self) -> Margins {
        // room for rotated brand names
        Margins::bottom(120)
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let trace = mean_price_bars(table, "brand", Some(TOP_BRANDS), theme::PRIMARY)?;
        let layout = theme::layout_for(self)
            .with(
                "xaxis",
                theme::axis(
                    self.x_title(),
                    [
                        ("tickangle", Value::from(-35i64)),
                        ("tickfont", Value::map([("size", 11u32)])),
                    ],
                ),
            )
            .with("showlegend", false);
        Ok(Figure::new(layout).with_trace(trace))
    }
}

pub struct CpuBrands;

impl Chart for CpuBrands {
    fn id(&self) -> &'static str {
        "bar_cpu_brand"
    }

    fn title(&self) -> &'static str {
        "Average Price by CPU Brand"
    }

    fn x_title(&self) -> &'static str {
        "CPU Brand"
    }

    fn y_title(&self) -> &'static str {
        "Average Price ($)"
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let trace = mean_price_bars(table, "cpu_brand", None, theme::SECONDARY)?;
        Ok(Figure::new(theme::layout_for(self).with("showlegend", false)).with_trace(trace))
    }
}
