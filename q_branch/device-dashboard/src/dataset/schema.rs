//! Schema descriptor for the device price dataset.
//!
//! Consulted once by the loader; everything downstream works off the typed
//! `Table` it produces.

/// How a column is parsed and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Categorical,
    Integer,
    Float,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Categorical => "categorical",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnKind::Categorical)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One expected column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn spec(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

/// Expected columns of the source file, in file order.
pub const EXPECTED_COLUMNS: &[ColumnSpec] = &[
    spec("device_type", ColumnKind::Categorical),
    spec("brand", ColumnKind::Categorical),
    spec("model", ColumnKind::Categorical),
    spec("release_year", ColumnKind::Integer),
    spec("os", ColumnKind::Categorical),
    spec("form_factor", ColumnKind::Categorical),
    spec("cpu_brand", ColumnKind::Categorical),
    spec("cpu_model", ColumnKind::Categorical),
    spec("cpu_tier", ColumnKind::Integer),
    spec("cpu_cores", ColumnKind::Integer),
    spec("cpu_threads", ColumnKind::Integer),
    spec("cpu_base_ghz", ColumnKind::Float),
    spec("cpu_boost_ghz", ColumnKind::Float),
    spec("gpu_brand", ColumnKind::Categorical),
    spec("gpu_model", ColumnKind::Categorical),
    spec("gpu_tier", ColumnKind::Integer),
    spec("vram_gb", ColumnKind::Integer),
    spec("ram_gb", ColumnKind::Integer),
    spec("storage_type", ColumnKind::Categorical),
    spec("storage_gb", ColumnKind::Integer),
    spec("storage_drive_count", ColumnKind::Integer),
    spec("display_type", ColumnKind::Categorical),
    spec("display_size_in", ColumnKind::Float),
    spec("resolution", ColumnKind::Categorical),
    spec("refresh_hz", ColumnKind::Integer),
    spec("battery_wh", ColumnKind::Float),
    spec("charger_watts", ColumnKind::Float),
    spec("psu_watts", ColumnKind::Float),
    spec("wifi", ColumnKind::Categorical),
    spec("bluetooth", ColumnKind::Float),
    spec("weight_kg", ColumnKind::Float),
    spec("warranty_months", ColumnKind::Integer),
    spec("price", ColumnKind::Float),
];

/// Columns removed at load time when present.
pub const DROPPED_COLUMNS: &[&str] = &["battery_wh", "charger_watts", "psu_watts"];

/// Name of the derived column appended by the loader.
pub const PERFORMANCE_SCORE: &str = "performance_score";

/// Inputs of `performance_score`; the loader refuses files without them.
pub const PERFORMANCE_INPUTS: [&str; 6] = [
    "cpu_tier",
    "gpu_tier",
    "cpu_cores",
    "vram_gb",
    "ram_gb",
    "cpu_boost_ghz",
];

/// Kind of a column by name. Unknown columns are read as categorical text.
pub fn kind_of(name: &str) -> ColumnKind {
    EXPECTED_COLUMNS
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.kind)
        .unwrap_or(ColumnKind::Categorical)
}

pub fn is_expected(name: &str) -> bool {
    EXPECTED_COLUMNS.iter().any(|c| c.name == name)
}

pub fn is_dropped(name: &str) -> bool {
    DROPPED_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds() {
        assert_eq!(kind_of("price"), ColumnKind::Float);
        assert_eq!(kind_of("release_year"), ColumnKind::Integer);
        assert_eq!(kind_of("os"), ColumnKind::Categorical);
        assert_eq!(kind_of("not_a_column"), ColumnKind::Categorical);
    }

    #[test]
    fn test_performance_inputs_are_numeric() {
        for name in PERFORMANCE_INPUTS {
            assert!(is_expected(name), "{} should be in the descriptor", name);
            assert!(kind_of(name).is_numeric(), "{} should be numeric", name);
        }
    }

    #[test]
    fn test_dropped_columns_are_described() {
        for name in DROPPED_COLUMNS {
            assert!(is_expected(name));
            assert!(is_dropped(name));
        }
        assert!(!is_dropped("price"));
    }
}
