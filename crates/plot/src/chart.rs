//! Backend-independent chart descriptions.

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One labelled polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub style: LineStyle,
    pub markers: bool,
}

impl LineSeries {
    /// Solid line with markers.
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            points,
            color,
            style: LineStyle::Solid,
            markers: true,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }

    pub fn without_markers(mut self) -> Self {
        self.markers = false;
        self
    }

    /// Points with both coordinates finite.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// Horizontal reference line across the whole x range.
#[derive(Debug, Clone, PartialEq)]
pub struct HLine {
    pub value: f64,
    pub color: Rgb,
    pub style: LineStyle,
    /// Legend entry; `None` keeps it out of the legend.
    pub label: Option<String>,
}

/// A titled x/y line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
    pub hlines: Vec<HLine>,
    /// Label x ticks as integers, with this many labels.
    pub integer_x: Option<usize>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            hlines: Vec::new(),
            integer_x: None,
        }
    }

    pub fn with_series(mut self, series: LineSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_hline(mut self, hline: HLine) -> Self {
        self.hlines.push(hline);
        self
    }

    pub fn with_integer_x(mut self, labels: usize) -> Self {
        self.integer_x = Some(labels);
        self
    }

    /// `(x_min, x_max, y_min, y_max)` over finite points and reference
    /// lines, padded by 5% of the span (or 1 when the span is zero).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let xs = self.series.iter().flat_map(|s| s.finite_points().map(|p| p.0));
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.finite_points().map(|p| p.1))
            .chain(self.hlines.iter().map(|h| h.value).filter(|v| v.is_finite()));
        let (x0, x1) = padded(min_max(xs), 0.0);
        let (y0, y1) = padded(min_max(ys), 0.05);
        (x0, x1, y0, y1)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn padded(range: Option<(f64, f64)>, fraction: f64) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if (hi - lo).abs() < 1e-12 => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * fraction;
            (lo - pad, hi + pad)
        }
    }
}

/// Sector frequencies for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRosePanel {
    pub label: String,
    /// Percent per sector, clockwise from north.
    pub frequencies: Vec<f64>,
    pub color: Rgb,
}

/// Side-by-side polar panels, one per series.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRoseChart {
    pub title: String,
    pub panels: Vec<WindRosePanel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GRAY;

    #[test]
    fn bounds_skip_nan_and_include_hlines() {
        let chart = LineChart::new("t", "x", "y")
            .with_series(LineSeries::new(
                "a",
                vec![(1.0, 2.0), (2.0, f64::NAN), (3.0, 4.0)],
                GRAY,
            ))
            .with_hline(HLine {
                value: 0.0,
                color: GRAY,
                style: LineStyle::Solid,
                label: None,
            });
        let (x0, x1, y0, y1) = chart.bounds();
        assert_eq!((x0, x1), (1.0, 3.0));
        assert!((y0 - -0.2).abs() < 1e-12);
        assert!((y1 - 4.2).abs() < 1e-12);
    }

    #[test]
    fn bounds_of_empty_chart() {
        assert_eq!(LineChart::new("t", "x", "y").bounds(), (0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_span_widened() {
        let chart = LineChart::new("t", "x", "y").with_series(LineSeries::new(
            "a",
            vec![(5.0, 3.0)],
            GRAY,
        ));
        assert_eq!(chart.bounds(), (4.0, 6.0, 2.0, 4.0));
    }
}
