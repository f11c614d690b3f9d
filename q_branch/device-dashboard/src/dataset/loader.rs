//! CSV loading for the device dataset.
//!
//! Parses every column according to the schema descriptor, drops the unused
//! power columns and appends the derived `performance_score`.

use crate::dataset::schema::{self, ColumnKind, PERFORMANCE_INPUTS, PERFORMANCE_SCORE};
use crate::dataset::table::{Column, ColumnData, Table};
use crate::error::{ComputeError, LoadError};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cell contents treated as a missing value.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
];

/// Largest magnitude an integral float may have and still be stored as `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Load the dataset from a CSV file.
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_from_reader(file)?;
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded device dataset"
    );
    Ok(table)
}

/// Load the dataset from any CSV source with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut seen = HashSet::new();
    let mut builders = Vec::with_capacity(headers.len());

    for name in headers.iter() {
        if !seen.insert(name.to_string()) {
            return Err(LoadError::DuplicateColumn(name.to_string()));
        }
        let builder = if schema::is_dropped(name) {
            debug!(column = name, "Dropping unused column");
            ColumnBuilder::Skip
        } else if name == PERFORMANCE_SCORE {
            debug!(column = name, "Ignoring source column, it is recomputed");
            ColumnBuilder::Skip
        } else {
            if !schema::is_expected(name) {
                debug!(column = name, "Column not in schema, reading as text");
            }
            ColumnBuilder::new(schema::kind_of(name))
        };
        builders.push((name.to_string(), builder));
    }

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row as u64 + 2);
        for (field, (name, builder)) in record.iter().zip(builders.iter_mut()) {
            builder.push(name, field, line)?;
        }
    }

    let columns: Vec<Column> = builders
        .into_iter()
        .filter_map(|(name, builder)| builder.finish().map(|data| Column::new(name, data)))
        .collect();

    let table = Table::new(columns)?;
    let scores = performance_scores(&table)?;
    table.with_column(Column::new(PERFORMANCE_SCORE, ColumnData::Float(scores)))
}

/// `(cpu_tier + gpu_tier + cpu_cores/4 + vram_gb/2 + ram_gb/8) * cpu_boost_ghz`
pub fn performance_score(
    cpu_tier: f64,
    gpu_tier: f64,
    cpu_cores: f64,
    vram_gb: f64,
    ram_gb: f64,
    cpu_boost_ghz: f64,
) -> f64 {
    (cpu_tier + gpu_tier + cpu_cores / 4.0 + vram_gb / 2.0 + ram_gb / 8.0) * cpu_boost_ghz
}

fn performance_scores(table: &Table) -> Result<Vec<Option<f64>>, LoadError> {
    let [cpu_tier, gpu_tier, cpu_cores, vram_gb, ram_gb, cpu_boost_ghz] =
        PERFORMANCE_INPUTS.map(|name| performance_input(table, name));
    let (cpu_tier, gpu_tier, cpu_cores, vram_gb, ram_gb, cpu_boost_ghz) =
        (cpu_tier?, gpu_tier?, cpu_cores?, vram_gb?, ram_gb?, cpu_boost_ghz?);

    Ok((0..table.row_count())
        .map(|i| {
            Some(performance_score(
                cpu_tier[i]?,
                gpu_tier[i]?,
                cpu_cores[i]?,
                vram_gb[i]?,
                ram_gb[i]?,
                cpu_boost_ghz[i]?,
            ))
        })
        .collect())
}

fn performance_input(table: &Table, name: &str) -> Result<Vec<Option<f64>>, LoadError> {
    table.numbers(name).map_err(|e| match e {
        ComputeError::MissingColumn(column) => LoadError::MissingColumn(column),
        ComputeError::ColumnType { column, .. } => LoadError::NotNumeric(column),
    })
}

/// Accumulates the cells of one column while reading records.
enum ColumnBuilder {
    Skip,
    Text(Vec<Option<String>>),
    Numeric {
        kind: ColumnKind,
        values: Vec<Option<f64>>,
        integers: Vec<Option<i64>>,
        integral: bool,
    },
}

impl ColumnBuilder {
    fn new(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Categorical => ColumnBuilder::Text(Vec::new()),
            kind => ColumnBuilder::Numeric {
                kind,
                values: Vec::new(),
                integers: Vec::new(),
                integral: kind == ColumnKind::Integer,
            },
        }
    }

    fn push(&mut self, name: &str, field: &str, line: u64) -> Result<(), LoadError> {
        let missing = MISSING_TOKENS.contains(&field);
        match self {
            ColumnBuilder::Skip => {}
            ColumnBuilder::Text(values) => {
                values.push((!missing).then(|| field.to_string()));
            }
            ColumnBuilder::Numeric {
                values,
                integers,
                integral,
                ..
            } => {
                if missing {
                    values.push(None);
                    integers.push(None);
                    return Ok(());
                }
                let value = parse_number(field).ok_or_else(|| LoadError::Parse {
                    column: name.to_string(),
                    line,
                    value: field.to_string(),
                })?;
                if value.is_nan() {
                    values.push(None);
                    integers.push(None);
                    return Ok(());
                }
                if *integral {
                    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
                        integers.push(Some(value as i64));
                    } else {
                        *integral = false;
                        integers.clear();
                    }
                }
                values.push(Some(value));
            }
        }
        Ok(())
    }

    fn finish(self) -> Option<ColumnData> {
        match self {
            ColumnBuilder::Skip => None,
            ColumnBuilder::Text(values) => Some(ColumnData::Text(values)),
            ColumnBuilder::Numeric {
                kind: ColumnKind::Integer,
                integers,
                integral: true,
                ..
            } => Some(ColumnData::Integer(integers)),
            ColumnBuilder::Numeric { values, .. } => Some(ColumnData::Float(values)),
        }
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field
        .parse::<i64>()
        .map(|i| i as f64)
        .ok()
        .or_else(|| field.parse::<f64>().ok())
}
