//! Plotly figure documents.
//!
//! A figure is a list of traces plus a layout, both stored as ordered
//! key/value pairs so the emitted JSON keeps insertion order.

use crate::value::{to_json_safe, Value};

/// Ordered attribute list. Setting an existing key replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
struct Attributes(Vec<(String, Value)>);

impl Attributes {
    fn set(&mut self, key: &str, value: Value) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// One data series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    kind: &'static str,
    attributes: Attributes,
}

impl Trace {
    /// A trace of the given Plotly type (`scatter`, `bar`, `box`, ...).
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            attributes: Attributes::default(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.set(key, value.into());
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn to_value(&self) -> Value {
        let mut entries = Vec::with_capacity(self.attributes.0.len() + 1);
        entries.push(("type".to_string(), Value::from(self.kind)));
        entries.extend(self.attributes.0.iter().cloned());
        Value::Map(entries)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    attributes: Attributes,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.set(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn to_value(&self) -> Value {
        Value::Map(self.attributes.0.clone())
    }
}

/// A complete chart document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            traces: Vec::new(),
            layout,
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    /// `{"data": [...], "layout": {...}}` as a value tree.
    pub fn to_value(&self) -> Value {
        Value::map([
            ("data", Value::seq(self.traces.iter().map(Trace::to_value))),
            ("layout", self.layout.to_value()),
        ])
    }

    pub fn to_json(&self) -> serde_json::Value {
        to_json_safe(&self.to_value())
    }

    /// The figure encoded as a JSON document string.
    pub fn to_document(&self) -> String {
        self.to_json().to_string()
    }
}
