//! In-memory device dataset.
//!
//! - `schema` - Expected columns and their kinds, dropped columns
//! - `table` - Immutable column-major `Table`
//! - `loader` - CSV loading and the derived `performance_score`
//! - `ops` - Value counts, group-by means, quantiles, correlation, sampling

pub mod loader;
pub mod ops;
pub mod schema;
pub mod table;

pub use loader::{load, load_from_reader};
pub use schema::ColumnKind;
pub use table::{Column, ColumnData, Table};
