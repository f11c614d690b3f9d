//! Statistics and chart documents for a device price dashboard.
//!
//! The crate loads a CSV of laptops and desktops (hardware details plus price)
//! once at startup and serves computed summaries and Plotly-compatible chart
//! documents over HTTP for a browser frontend.
//!
//! ## Architecture
//!
//! 1. **Dataset** (`dataset` module) - Schema descriptor, the immutable
//!    columnar `Table`, the CSV loader and shared frame operations.
//!
//! 2. **Statistics** (`stats`, `summary`) - Per-column descriptive statistics
//!    and the headline numbers shown above the charts.
//!
//! 3. **Charts** (`charts` module) - Registry of the nine dashboard charts,
//!    each built into a `Figure` with the shared visual theme.
//!
//! 4. **Serialization** (`value` module) - Closed value tree converted to
//!    JSON-safe output, with missing numbers mapped to `null`.
//!
//! 5. **Server** (`server` module) - axum router exposing the above.
//!
//! ## Usage
//!
//! ```bash
//! device-dashboard --data computer_prices_all.csv --port 5001
//! ```

pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod server;
pub mod stats;
pub mod summary;
pub mod value;

pub use dataset::Table;
pub use error::{ComputeError, LoadError};
