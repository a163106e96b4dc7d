//! SVG paths for the income/expense area chart.

use std::fmt::Write;

use crate::constants::{CHART_HEADROOM, CHART_HEIGHT, CHART_PADDING, CHART_WIDTH};
use crate::utils::format_compact_peso;

/// The SVG view box the paths are drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            padding: CHART_PADDING,
        }
    }
}

impl ChartFrame {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    fn plot_height(&self) -> f64 {
        (self.height - self.padding * 2.0).max(0.0)
    }
}

/// Value range mapped onto the frame's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    /// Observed min and max over every series, with `max` scaled by `headroom`.
    ///
    /// Non-finite values are ignored. With no values the domain is `0..0`.
    pub fn from_series(series: &[&[f64]], headroom: f64) -> Self {
        let mut values = series
            .iter()
            .flat_map(|s| s.iter().copied())
            .filter(|v| v.is_finite())
            .peekable();

        if values.peek().is_none() {
            return Self { min: 0.0, max: 0.0 };
        }

        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Self {
            min,
            max: max * headroom,
        }
    }

    pub fn with_default_headroom(series: &[&[f64]]) -> Self {
        Self::from_series(series, CHART_HEADROOM)
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` in the domain, `0.0` at `min` and `1.0` at `max`.
    ///
    /// A zero or negative range maps everything to `0.0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.range();
        if range <= f64::EPSILON || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn points(values: &[f64], domain: &ValueDomain, frame: &ChartFrame) -> Vec<Point> {
    let plot_height = frame.plot_height();
    let y_of = |value: f64| frame.padding + (1.0 - domain.normalize(value)) * plot_height;

    match values {
        [] => Vec::new(),
        // A single value is drawn as a flat run across the frame.
        [only] => {
            let y = y_of(*only);
            vec![Point { x: 0.0, y }, Point { x: frame.width, y }]
        }
        _ => {
            let last = (values.len() - 1) as f64;
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Point {
                    x: i as f64 / last * frame.width,
                    y: y_of(*v),
                })
                .collect()
        }
    }
}

fn push_curves(path: &mut String, points: &[Point]) {
    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let mid_x = (current.x + next.x) / 2.0;
        let _ = write!(
            path,
            "C {} {}, {} {}, {} {} ",
            fmt_coord(mid_x),
            fmt_coord(current.y),
            fmt_coord(mid_x),
            fmt_coord(next.y),
            fmt_coord(next.x),
            fmt_coord(next.y)
        );
    }
}

fn fmt_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Closed area under the series, anchored to the bottom edge at both ends.
pub fn area_path(values: &[f64], domain: &ValueDomain, frame: &ChartFrame) -> String {
    let baseline = fmt_coord(frame.height);
    let width = fmt_coord(frame.width);
    let points = points(values, domain, frame);

    let mut path = format!("M 0 {} ", baseline);
    if let Some(first) = points.first() {
        let _ = write!(path, "L {} {} ", fmt_coord(first.x), fmt_coord(first.y));
        push_curves(&mut path, &points);
    }
    let _ = write!(path, "L {} {} Z", width, baseline);
    path
}

/// Open stroke through the series. Empty for an empty series.
pub fn line_path(values: &[f64], domain: &ValueDomain, frame: &ChartFrame) -> String {
    let points = points(values, domain, frame);
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut path = format!("M {} {} ", fmt_coord(first.x), fmt_coord(first.y));
    push_curves(&mut path, &points);
    path.trim_end().to_string()
}

/// Y-axis labels from top to bottom: four stepped values above `min`, then `₱0`.
pub fn y_axis_labels(domain: &ValueDomain) -> Vec<String> {
    let range = domain.range().max(0.0);
    let unit = if range > 30_000.0 {
        10_000.0
    } else if range > 15_000.0 {
        5_000.0
    } else {
        2_000.0
    };
    let step = (range / 4.0 / unit).ceil() * unit;

    let mut labels: Vec<String> = (1..=4)
        .rev()
        .map(|i| domain.min + step * i as f64)
        .filter(|value| *value > 0.0)
        .map(format_compact_peso)
        .collect();
    labels.push(format_compact_peso(0.0));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_closes_along_bottom() {
        let frame = ChartFrame::default();
        let values = [10.0, 20.0, 15.0];
        let domain = ValueDomain::with_default_headroom(&[&values]);
        let path = area_path(&values, &domain, &frame);
        assert!(path.starts_with("M 0 120 L 0 "));
        assert!(path.ends_with("L 100 120 Z"));
        assert_eq!(path.matches('C').count(), 2);
    }

    #[test]
    fn line_is_open() {
        let frame = ChartFrame::default();
        let values = [0.0, 100.0];
        let domain = ValueDomain::from_series(&[&values], 1.0);
        let path = line_path(&values, &domain, &frame);
        assert_eq!(path, "M 0 112 C 50 112, 50 8, 100 8");
    }

    #[test]
    fn empty_and_single_series() {
        let frame = ChartFrame::default();
        let domain = ValueDomain::from_series(&[], CHART_HEADROOM);
        assert_eq!(area_path(&[], &domain, &frame), "M 0 120 L 100 120 Z");
        assert_eq!(line_path(&[], &domain, &frame), "");

        let single = [42.0];
        let domain = ValueDomain::with_default_headroom(&[&single]);
        let line = line_path(&single, &domain, &frame);
        assert!(line.starts_with("M 0 "));
        assert!(line.ends_with(" 100 112"));
    }

    #[test]
    fn axis_labels_end_at_zero() {
        let domain = ValueDomain { min: 0.0, max: 40_000.0 };
        assert_eq!(
            y_axis_labels(&domain),
            vec!["₱40k", "₱30k", "₱20k", "₱10k", "₱0"]
        );
        let flat = ValueDomain { min: 0.0, max: 0.0 };
        assert_eq!(y_axis_labels(&flat), vec!["₱0"]);
    }
}
