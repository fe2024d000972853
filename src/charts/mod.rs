//! Chart input shapes and the renderer seam
//!
//! The core never renders anything itself. It produces named numeric
//! series plus category labels, guarantees the two always agree in length,
//! and hands them to whatever renderer was injected. A missing renderer is
//! not a fault: drawing degrades to a warning and a no-op.

use serde::{Deserialize, Serialize};

/// A named line series with an optional color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub data: Vec<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartItem {
    pub label: String,
    pub value: f64,
}

/// One slice of a donut chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutChartItem {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Zero-fill a series so its length matches the label count
///
/// Labels are never truncated; a series longer than the label list is left
/// alone (the label axis is authoritative upstream and cannot shrink here).
pub fn pad_series(series: &mut LineSeries, label_count: usize) {
    while series.data.len() < label_count {
        series.data.push(0.0);
    }
}

/// Renderer capability injected by the presentation layer
pub trait ChartRenderer {
    fn line(&self, series: &[LineSeries], labels: &[String]);
    fn bar(&self, items: &[BarChartItem]);
    fn donut(&self, items: &[DonutChartItem]);
}

/// Capability-checked drawing surface
///
/// Holds an optional renderer; every draw call pads its series to the
/// label axis first, then either delegates or warns and does nothing.
pub struct ChartSurface {
    renderer: Option<Box<dyn ChartRenderer>>,
}

impl ChartSurface {
    /// Surface with a renderer attached
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self {
            renderer: Some(renderer),
        }
    }

    /// Surface without a renderer; every draw is a no-op
    pub fn detached() -> Self {
        Self { renderer: None }
    }

    /// Whether a renderer is attached
    pub fn is_available(&self) -> bool {
        self.renderer.is_some()
    }

    /// Draw a line chart; series are padded to the label count
    pub fn draw_line(&self, mut series: Vec<LineSeries>, labels: &[String]) {
        for s in &mut series {
            pad_series(s, labels.len());
        }
        match &self.renderer {
            Some(r) => r.line(&series, labels),
            None => log::warn!("chart renderer not available, skipping line chart"),
        }
    }

    /// Draw a bar chart
    pub fn draw_bar(&self, items: &[BarChartItem]) {
        match &self.renderer {
            Some(r) => r.bar(items),
            None => log::warn!("chart renderer not available, skipping bar chart"),
        }
    }

    /// Draw a donut chart
    pub fn draw_donut(&self, items: &[DonutChartItem]) {
        match &self.renderer {
            Some(r) => r.donut(items),
            None => log::warn!("chart renderer not available, skipping donut chart"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingRenderer {
        line_lengths: Arc<AtomicUsize>,
    }

    impl ChartRenderer for CountingRenderer {
        fn line(&self, series: &[LineSeries], labels: &[String]) {
            for s in series {
                assert_eq!(s.data.len(), labels.len());
            }
            self.line_lengths.store(labels.len(), Ordering::SeqCst);
        }
        fn bar(&self, _items: &[BarChartItem]) {}
        fn donut(&self, _items: &[DonutChartItem]) {}
    }

    #[test]
    fn test_pad_series_zero_fills_to_label_count() {
        let mut series = LineSeries {
            name: "Liability".into(),
            data: vec![1.0, 2.0],
            color: None,
        };
        pad_series(&mut series, 4);
        assert_eq!(series.data, vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pad_series_never_truncates() {
        let mut series = LineSeries {
            name: "CSM".into(),
            data: vec![1.0, 2.0, 3.0],
            color: None,
        };
        pad_series(&mut series, 2);
        assert_eq!(series.data.len(), 3);
    }

    #[test]
    fn test_surface_pads_before_delegating() {
        let seen = Arc::new(AtomicUsize::new(0));
        let surface = ChartSurface::new(Box::new(CountingRenderer {
            line_lengths: Arc::clone(&seen),
        }));
        let labels = vec!["2022".to_string(), "2023".to_string(), "2024".to_string()];
        surface.draw_line(
            vec![LineSeries {
                name: "Liability".into(),
                data: vec![10.0],
                color: Some("#22C55E".into()),
            }],
            &labels,
        );
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_detached_surface_is_noop() {
        let surface = ChartSurface::detached();
        assert!(!surface.is_available());
        // Must not panic or error
        surface.draw_line(vec![], &[]);
        surface.draw_bar(&[]);
        surface.draw_donut(&[]);
    }
}
