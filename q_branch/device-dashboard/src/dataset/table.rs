//! Immutable column-major table.
//!
//! Built once by the loader and shared read-only behind an `Arc`. Missing
//! cells are `None` in every column kind.

use crate::dataset::schema::ColumnKind;
use crate::error::{ComputeError, LoadError};
use std::collections::HashMap;

/// Values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

impl ColumnData {
    /// Text column with every cell present.
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnData::Text(values.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Integer column with every cell present.
    pub fn integers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        ColumnData::Integer(values.into_iter().map(Some).collect())
    }

    /// Float column; NaN cells become missing.
    pub fn floats<I: IntoIterator<Item = f64>>(values: I) -> Self {
        ColumnData::Float(
            values
                .into_iter()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Text(_) => ColumnKind::Categorical,
            ColumnData::Integer(_) => ColumnKind::Integer,
            ColumnData::Float(_) => ColumnKind::Float,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric view of the column, widening integers. `None` for text.
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            ColumnData::Text(_) => None,
            ColumnData::Integer(v) => Some(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }
}

/// The device dataset.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
}

impl Table {
    /// Assemble a table, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self, LoadError> {
        let row_count = columns.first().map(|c| c.data.len()).unwrap_or(0);
        let mut index = HashMap::with_capacity(columns.len());

        for (i, column) in columns.iter().enumerate() {
            if column.data.len() != row_count {
                return Err(LoadError::LengthMismatch {
                    column: column.name.clone(),
                    expected: row_count,
                    actual: column.data.len(),
                });
            }
            if index.insert(column.name.clone(), i).is_some() {
                return Err(LoadError::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self {
            columns,
            index,
            row_count,
        })
    }

    /// Consume the table and return it with `column` appended.
    pub fn with_column(mut self, column: Column) -> Result<Self, LoadError> {
        if !self.columns.is_empty() && column.data.len() != self.row_count {
            return Err(LoadError::LengthMismatch {
                column: column.name,
                expected: self.row_count,
                actual: column.data.len(),
            });
        }
        if self.index.contains_key(&column.name) {
            return Err(LoadError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.row_count = column.data.len();
        }
        self.index.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Borrow a categorical column.
    pub fn text(&self, name: &str) -> Result<&[Option<String>], ComputeError> {
        let column = self.require(name)?;
        column.data.as_text().ok_or_else(|| ComputeError::ColumnType {
            column: name.to_string(),
            expected: ColumnKind::Categorical.as_str(),
            actual: column.kind().as_str(),
        })
    }

    /// Numeric values of a column as `f64`.
    pub fn numbers(&self, name: &str) -> Result<Vec<Option<f64>>, ComputeError> {
        let column = self.require(name)?;
        column.data.to_f64().ok_or_else(|| ComputeError::ColumnType {
            column: name.to_string(),
            expected: "numeric",
            actual: column.kind().as_str(),
        })
    }

    fn require(&self, name: &str) -> Result<&Column, ComputeError> {
        self.column(name)
            .ok_or_else(|| ComputeError::MissingColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::new("brand", ColumnData::text(["A", "B"])),
            Column::new("price", ColumnData::floats([1.0])),
        ]);
        assert!(matches!(
            result,
            Err(LoadError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::new("price", ColumnData::floats([1.0])),
            Column::new("price", ColumnData::floats([2.0])),
        ]);
        assert!(matches!(result, Err(LoadError::DuplicateColumn(name)) if name == "price"));
    }

    #[test]
    fn test_typed_accessors() {
        let table = Table::new(vec![
            Column::new("brand", ColumnData::text(["A", "B"])),
            Column::new("ram_gb", ColumnData::integers([8, 16])),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.numbers("ram_gb").unwrap(), vec![Some(8.0), Some(16.0)]);
        assert_eq!(table.text("brand").unwrap()[1].as_deref(), Some("B"));
        assert_eq!(
            table.numbers("brand"),
            Err(ComputeError::ColumnType {
                column: "brand".to_string(),
                expected: "numeric",
                actual: "categorical",
            })
        );
        assert_eq!(
            table.text("os"),
            Err(ComputeError::MissingColumn("os".to_string()))
        );
    }

    #[test]
    fn test_floats_map_nan_to_missing() {
        let data = ColumnData::floats([1.5, f64::NAN]);
        assert_eq!(data, ColumnData::Float(vec![Some(1.5), None]));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }
}
