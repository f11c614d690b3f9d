//! Per-column descriptive statistics.
//!
//! Categorical columns get a frequency summary, numerical columns the usual
//! describe block plus an explicit Q1/Q2/Q3 triple. The frontend reads the
//! quartiles from both places, so both are kept.

use crate::dataset::ops;
use crate::dataset::Table;
use crate::error::ComputeError;
use indexmap::IndexMap;
use serde::Serialize;

/// Columns summarized as categories, in output order.
pub const CATEGORICAL_COLUMNS: &[&str] = &[
    "device_type",
    "brand",
    "model",
    "os",
    "form_factor",
    "cpu_brand",
    "cpu_model",
    "gpu_brand",
    "gpu_model",
    "storage_type",
    "display_type",
    "resolution",
    "wifi",
];

/// Columns summarized as numbers, in output order.
pub const NUMERICAL_COLUMNS: &[&str] = &[
    "release_year",
    "cpu_tier",
    "cpu_cores",
    "cpu_threads",
    "cpu_base_ghz",
    "cpu_boost_ghz",
    "gpu_tier",
    "vram_gb",
    "ram_gb",
    "storage_gb",
    "storage_drive_count",
    "display_size_in",
    "refresh_hz",
    "bluetooth",
    "weight_kg",
    "warranty_months",
    "price",
    "performance_score",
];

/// Number of most frequent values reported per categorical column.
pub const TOP_VALUES: usize = 10;

/// Statistics keyed by column name, categorical columns first.
pub type Statistics = IndexMap<String, ColumnStatistic>;

/// Statistics of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnStatistic {
    Categorical {
        describe: CategoricalSummary,
        value_counts: IndexMap<String, usize>,
        total_unique: usize,
    },
    Numerical {
        describe: NumericSummary,
        quartiles: Quartiles,
    },
}

/// count / unique / top / freq. `top` and `freq` are null without values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

/// Describe block of a numeric column. Undefined entries serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quartiles {
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
}

/// Compute statistics for every listed column present in `table`.
///
/// A table without rows yields an empty mapping.
pub fn compute_statistics(table: &Table) -> Result<Statistics, ComputeError> {
    let mut stats = Statistics::new();
    if table.is_empty() {
        return Ok(stats);
    }

    for &name in CATEGORICAL_COLUMNS {
        if !table.has_column(name) {
            continue;
        }
        let values = table.text(name)?;
        stats.insert(name.to_string(), categorical(values));
    }

    for &name in NUMERICAL_COLUMNS {
        if !table.has_column(name) {
            continue;
        }
        let values = table.numbers(name)?;
        stats.insert(name.to_string(), numerical(&values));
    }

    Ok(stats)
}

/// Frequency statistics of a categorical column.
pub fn categorical(values: &[Option<String>]) -> ColumnStatistic {
    let counts = ops::value_counts(values);
    let count: usize = counts.iter().map(|(_, n)| n).sum();
    let (top, freq) = match counts.first() {
        Some((value, n)) => (Some(value.clone()), Some(*n)),
        None => (None, None),
    };

    ColumnStatistic::Categorical {
        describe: CategoricalSummary {
            count,
            unique: counts.len(),
            top,
            freq,
        },
        total_unique: counts.len(),
        value_counts: counts.into_iter().take(TOP_VALUES).collect(),
    }
}

/// Describe block and quartiles of a numeric column.
pub fn numerical(values: &[Option<f64>]) -> ColumnStatistic {
    let describe = describe_numeric(values);
    let quartiles = Quartiles {
        q1: describe.p25,
        q2: describe.p50,
        q3: describe.p75,
    };
    ColumnStatistic::Numerical {
        describe,
        quartiles,
    }
}

pub fn describe_numeric(values: &[Option<f64>]) -> NumericSummary {
    let sorted = ops::sorted_present(values);
    NumericSummary {
        count: sorted.len(),
        mean: ops::mean(&sorted),
        std: ops::sample_std(&sorted),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        p25: ops::quantile_sorted(&sorted, 0.25),
        p50: ops::quantile_sorted(&sorted, 0.5),
        p75: ops::quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}
