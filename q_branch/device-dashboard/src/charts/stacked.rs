//! GPU brand composition of each device type.

use super::figure::{Figure, Trace};
use super::theme;
use super::Chart;
use crate::dataset::{ops, Table};
use crate::error::ComputeError;
use crate::value::Value;
use std::collections::HashMap;

/// GPU brands shown, most common first.
pub const TOP_GPU_BRANDS: usize = 5;

pub struct GpuByDevice;

impl Chart for GpuByDevice {
    fn id(&self) -> &'static str {
        "stacked_gpu_device"
    }

    fn title(&self) -> &'static str {
        "GPU Brand Composition by Device Type (%)"
    }

    fn x_title(&self) -> &'static str {
        "Device Type"
    }

    fn y_title(&self) -> &'static str {
        "Percentage (%)"
    }

    fn build(&self, table: &Table) -> Result<Figure, ComputeError> {
        let gpu = table.text("gpu_brand")?;
        let device = table.text("device_type")?;

        let gpu_brands: Vec<String> = ops::value_counts(gpu)
            .into_iter()
            .take(TOP_GPU_BRANDS)
            .map(|(name, _)| name)
            .collect();
        let device_types = ops::value_counts(device);

        let mut pairs: HashMap<(&str, &str), usize> = HashMap::new();
        for (d, g) in device.iter().zip(gpu) {
            if let (Some(d), Some(g)) = (d, g) {
                *pairs.entry((d.as_str(), g.as_str())).or_default() += 1;
            }
        }

        let x: Vec<&str> = device_types.iter().map(|(name, _)| name.as_str()).collect();
        let layout = theme::layout_for(self).with("barmode", "stack").with(
            "legend",
            Value::map([
                ("orientation", Value::from("h")),
                ("yanchor", Value::from("bottom")),
                ("y", Value::from(1.02)),
                ("xanchor", Value::from("center")),
                ("x", Value::from(0.5)),
            ]),
        );

        let mut figure = Figure::new(layout);
        for (brand, color) in gpu_brands.iter().zip(theme::PALETTE) {
            let y: Vec<f64> = device_types
                .iter()
                .map(|(device, total)| {
                    let count = pairs.get(&(device.as_str(), brand.as_str())).copied().unwrap_or(0);
                    count as f64 / *total as f64 * 100.0
                })
                .collect();
            figure = figure.with_trace(
                Trace::new("bar")
                    .with("name", brand)
                    .with("x", x.clone())
                    .with("y", y)
                    .with("marker", theme::marker(color)),
            );
        }
        Ok(figure)
    }
}
