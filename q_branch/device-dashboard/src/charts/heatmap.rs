//! Correlation matrix of the main numeric columns.
//!
//! Correlations use pairwise-complete rows and are rounded to three
//! decimals. Pairs without a defined correlation are emitted as null.

use super::figure::{Figure, Trace};
use super::theme::{self, Margins};
use super::Chart;
use crate::dataset::schema::PERFORMANCE_SCORE;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;

/// Candidate columns, in matrix order. Absent ones are skipped.
pub const CORRELATION_COLUMNS: [&str; 10] = [
    "price",
    PERFORMANCE_SCORE,
    "cpu_cores",
    "cpu_threads",
    "ram_gb",
    "storage_gb",
    "vram_gb",
    "cpu_base_ghz",
    "cpu_boost_ghz",
    "release_year",
];

pub struct Correlation;

impl Chart for Correlation {
    fn id(&self) -> &'static str {
        "heatmap_correlation"
    }

    fn title(&self) -> &'static str {
        "Correlation Matrix of Numeric Variables"
    }

    fn height(&self) -> u32 {
        600
    }

    fn margins(&self) -> Margins {
        Margins {
            l: 100,
            r: 60,
            t: 120,
            b: 100,
        }
    }

    fn plot_background(&self) -> &'static str {
        theme::WHITE
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let columns: Vec<&str> = CORRELATION_COLUMNS
            .into_iter()
            .filter(|name| table.has_column(name))
            .collect();
        let matrix = correlation_matrix(table, &columns)?;

        let trace = Trace::new("heatmap")
            .with("z", matrix.clone())
            .with("x", columns.clone())
            .with("y", columns)
            .with("colorscale", "RdBu")
            .with("zmid", 0i64)
            .with("text", matrix)
            .with("texttemplate", "%{text:.2f}")
            .with("textfont", Value::map([("size", 10u32)]))
            .with("hoverongaps", false);

        Ok(Figure::new(theme::layout_for(self).with("font", theme::font(11))).with_trace(trace))
    }
}

/// Symmetric matrix of rounded Pearson coefficients.
pub fn correlation_matrix(table: &Table, columns: &[&str]) -> Result<Vec<Vec<f64>>, ComputeError> {
    let values = columns
        .iter()
        .map(|name| table.numbers(name))
        .collect::<Result<Vec<_>, _>>()?;

    let n = values.len();
    let mut matrix = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = ops::round_to(ops::pearson(&values[i], &values[j]), 3);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    Ok(matrix)
}
