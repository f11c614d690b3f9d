//! Chart abstraction for the dashboard figures.
//!
//! Every chart is a `Chart` trait object held by the `ChartRegistry`, in
//! the order the dashboard lays them out. Building is all-or-nothing: the
//! first chart that fails aborts the whole set.

pub mod bars;
pub mod box_plot;
pub mod figure;
pub mod heatmap;
pub mod histogram;
pub mod pie;
pub mod scatter;
pub mod stacked;
pub mod theme;
pub mod trend;

pub use figure::{Figure, Layout, Trace};
pub use theme::Margins;

use crate::dataset::Table;
use crate::error::ComputeError;
use crate::value::Value;
use indexmap::IndexMap;
use thiserror::Error;

/// Built figures keyed by chart id, in registry order.
pub type ChartSet = IndexMap<&'static str, Figure>;

/// A chart that failed to build.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("chart '{chart}' failed: {source}")]
pub struct ChartError {
    pub chart: &'static str,
    #[source]
    pub source: ComputeError,
}

/// A dashboard chart.
pub trait Chart: Send + Sync {
    /// Unique identifier, used as the key in API responses.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn x_title(&self) -> &'static str {
        ""
    }

    fn y_title(&self) -> &'static str {
        ""
    }

    fn height(&self) -> u32 {
        500
    }

    fn margins(&self) -> Margins {
        Margins::STANDARD
    }

    fn plot_background(&self) -> &'static str {
        theme::PLOT_BACKGROUND
    }

    /// Build the figure from the dataset.
    fn build(&self, table: &Table) -> Result<Figure, ComputeError>;

    /// Figure shown in place of this chart when it cannot be built.
    fn placeholder(&self) -> Figure {
        no_data_figure(self.title(), self.x_title(), self.y_title(), self.height())
    }
}

/// Registry of the dashboard charts.
pub struct ChartRegistry {
    charts: Vec<Box<dyn Chart>>,
}

impl ChartRegistry {
    /// Create a registry with the nine dashboard charts.
    pub fn new() -> Self {
        let mut registry = Self { charts: Vec::new() };
        registry.register(Box::new(scatter::PricePerformance));
        registry.register(Box::new(bars::TopBrands));
        registry.register(Box::new(box_plot::PriceByOs));
        registry.register(Box::new(histogram::PriceHistogram));
        registry.register(Box::new(pie::DeviceTypes));
        registry.register(Box::new(heatmap::Correlation));
        registry.register(Box::new(bars::CpuBrands));
        registry.register(Box::new(trend::PriceTrend));
        registry.register(Box::new(stacked::GpuByDevice));
        registry
    }

    pub fn register(&mut self, chart: Box<dyn Chart>) {
        self.charts.push(chart);
    }

    /// Get a chart by id.
    pub fn get(&self, id: &str) -> Option<&dyn Chart> {
        self.charts
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.charts.iter().map(|c| c.id())
    }

    /// Build every chart, stopping at the first failure.
    pub fn build_all(&self, table: &Table) -> Result<ChartSet, ChartError> {
        let mut set = ChartSet::with_capacity(self.charts.len());
        for chart in &self.charts {
            let figure = chart.build(table).map_err(|source| ChartError {
                chart: chart.id(),
                source,
            })?;
            set.insert(chart.id(), figure);
        }
        Ok(set)
    }
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build all dashboard charts with the default registry.
pub fn build_charts(table: &Table) -> Result<ChartSet, ChartError> {
    ChartRegistry::new().build_all(table)
}

/// Empty figure with a centered "No data available" notice.
pub fn no_data_figure(title: &str, x_title: &str, y_title: &str, height: u32) -> Figure {
    let annotation = Value::map([
        ("text", Value::from("No data available")),
        ("xref", Value::from("paper")),
        ("yref", Value::from("paper")),
        ("x", Value::from(0.5)),
        ("y", Value::from(0.5)),
        ("xanchor", Value::from("center")),
        ("yanchor", Value::from("middle")),
        ("showarrow", Value::from(false)),
        (
            "font",
            Value::map([("size", Value::from(20u32)), ("color", Value::from("gray"))]),
        ),
    ]);

    Figure::new(
        Layout::new()
            .with("title", Value::map([("text", title)]))
            .with("xaxis", Value::map([("title", Value::map([("text", x_title)]))]))
            .with("yaxis", Value::map([("title", Value::map([("text", y_title)]))]))
            .with("height", height)
            .with("plot_bgcolor", theme::WHITE)
            .with("paper_bgcolor", theme::WHITE)
            .with("annotations", vec![annotation]),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, ColumnData};

    #[test]
    fn test_registry_order() {
        let ids: Vec<&str> = ChartRegistry::new().ids().collect();
        assert_eq!(
            ids,
            [
                "scatter_price_performance",
                "bar_top_brands",
                "box_price_os",
                "hist_price",
                "pie_device_type",
                "heatmap_correlation",
                "bar_cpu_brand",
                "line_price_trend",
                "stacked_gpu_device",
            ]
        );
    }

    #[test]
    fn test_build_charts_returns_every_chart() {
        let set = build_charts(&fixtures::devices()).unwrap();
        assert_eq!(set.len(), 9);
        for (id, figure) in &set {
            assert!(!figure.traces.is_empty(), "{} should have traces", id);
        }
    }

    #[test]
    fn test_missing_column_fails_whole_set() {
        let table = Table::new(vec![
            Column::new("price", ColumnData::floats([1.0, 2.0])),
            Column::new("performance_score", ColumnData::floats([3.0, 4.0])),
        ])
        .unwrap();

        let err = build_charts(&table).unwrap_err();
        assert_eq!(err.chart, "bar_top_brands");
        assert_eq!(err.source, ComputeError::MissingColumn("brand".to_string()));
    }

    #[test]
    fn test_get_by_id() {
        let registry = ChartRegistry::new();
        assert_eq!(registry.get("hist_price").map(|c| c.title()), Some("Price Distribution"));
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_no_data_figure() {
        let json = no_data_figure("Price Distribution", "Price ($)", "Frequency", 500).to_json();

        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["layout"]["height"], 500);
        assert_eq!(json["layout"]["title"]["text"], "Price Distribution");
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "Price ($)");
        let annotation = &json["layout"]["annotations"][0];
        assert_eq!(annotation["text"], "No data available");
        assert_eq!(annotation["showarrow"], false);
        assert_eq!(annotation["font"]["color"], "gray");
    }

    #[test]
    fn test_themed_layout() {
        let registry = ChartRegistry::new();
        let chart = registry.get("bar_cpu_brand").unwrap();
        let json = crate::value::to_json_safe(&theme::layout_for(chart).to_value());

        assert_eq!(json["title"]["font"]["size"], 18);
        assert_eq!(json["title"]["xanchor"], "center");
        assert_eq!(json["yaxis"]["title"]["text"], "Average Price ($)");
        assert_eq!(json["margin"], serde_json::json!({"l": 90, "r": 60, "t": 120, "b": 90}));
        assert_eq!(json["paper_bgcolor"], "white");
    }
}
