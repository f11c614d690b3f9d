//! Headline numbers shown above the dashboard charts.

use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use indexmap::IndexMap;
use serde::Serialize;

/// Dataset overview. Prices are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_devices: usize,
    pub avg_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub total_brands: usize,
    pub total_models: usize,
    pub device_types: IndexMap<String, usize>,
    pub operating_systems: IndexMap<String, usize>,
}

pub fn summarize(table: &Table) -> Result<Summary, ComputeError> {
    let prices = ops::sorted_present(&table.numbers("price")?);
    let brands = table.text("brand")?;
    let models = table.text("model")?;
    let device_types = table.text("device_type")?;
    let operating_systems = table.text("os")?;

    Ok(Summary {
        total_devices: table.row_count(),
        avg_price: ops::round_to(ops::mean(&prices), 2),
        median_price: ops::round_to(ops::quantile_sorted(&prices, 0.5), 2),
        min_price: ops::round_to(prices.first().copied().unwrap_or(f64::NAN), 2),
        max_price: ops::round_to(prices.last().copied().unwrap_or(f64::NAN), 2),
        total_brands: ops::distinct_count(brands),
        total_models: ops::distinct_count(models),
        device_types: ops::value_counts(device_types).into_iter().collect(),
        operating_systems: ops::value_counts(operating_systems).into_iter().collect(),
    })
}
