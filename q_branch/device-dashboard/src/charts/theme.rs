//! Shared visual theme of the dashboard charts.

use super::figure::Layout;
use super::Chart;
use crate::value::Value;

pub const PRIMARY: &str = "#667eea";
pub const SECONDARY: &str = "#764ba2";

/// Slice and series colors, in assignment order.
pub const PALETTE: [&str; 6] = [PRIMARY, SECONDARY, "#f093fb", "#f5576c", "#4facfe", "#00f2fe"];

pub const TITLE_COLOR: &str = "#2c3e50";
pub const FONT_FAMILY: &str = "Arial, sans-serif";
pub const PLOT_BACKGROUND: &str = "rgba(248, 249, 250, 0.5)";
pub const WHITE: &str = "white";

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margins {
    pub const STANDARD: Margins = Margins::bottom(90);

    /// Standard left/right/top margins with a custom bottom.
    pub const fn bottom(b: u32) -> Self {
        Margins {
            l: 90,
            r: 60,
            t: 120,
            b,
        }
    }

    fn to_value(self) -> Value {
        Value::map([("l", self.l), ("r", self.r), ("t", self.t), ("b", self.b)])
    }
}

pub fn font(size: u32) -> Value {
    Value::map([("size", Value::from(size)), ("family", Value::from(FONT_FAMILY))])
}

/// `{"color": color}` marker block.
pub fn marker(color: &str) -> Value {
    Value::map([("color", color)])
}

fn title(text: &str) -> Value {
    Value::map([
        ("text", Value::from(text)),
        ("x", Value::from(0.5)),
        ("xanchor", Value::from("center")),
        (
            "font",
            Value::map([
                ("size", Value::from(18u32)),
                ("color", Value::from(TITLE_COLOR)),
                ("family", Value::from(FONT_FAMILY)),
                ("weight", Value::from(700u32)),
            ]),
        ),
    ])
}

fn axis_title(text: &str) -> Value {
    Value::map([("title", Value::map([("text", text)]))])
}

/// Base layout of a chart: title, axis titles, size, margins and colors.
pub fn layout_for(chart: &dyn Chart) -> Layout {
    let mut layout = Layout::new().with("title", title(chart.title()));
    if !chart.x_title().is_empty() {
        layout = layout.with("xaxis", axis_title(chart.x_title()));
    }
    if !chart.y_title().is_empty() {
        layout = layout.with("yaxis", axis_title(chart.y_title()));
    }
    layout
        .with("autosize", true)
        .with("height", chart.height())
        .with("margin", chart.margins().to_value())
        .with("font", font(12))
        .with("plot_bgcolor", chart.plot_background())
        .with("paper_bgcolor", WHITE)
}

/// Axis block carrying a title plus extra tick settings.
pub fn axis(text: &str, extra: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    let mut entries = vec![("title".to_string(), Value::map([("text", text)]))];
    entries.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v)));
    Value::Map(entries)
}
