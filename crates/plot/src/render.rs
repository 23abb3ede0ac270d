//! PNG rendering with plotters.

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::{
    BLACK, BitMapBackend, ChartBuilder, Circle, Color, DashedLineSeries, DrawingArea,
    IntoDrawingArea, PathElement, Polygon, RGBColor, SeriesLabelPosition, ShapeStyle, Text, WHITE,
};
use plotters::series::LineSeries as PlotLine;

use crate::chart::{LineChart, LineStyle, WindRoseChart, WindRosePanel};
use crate::color::Rgb;
use crate::error::{PlotError, render_err};

/// Destination for finished charts.
///
/// The analysis pipeline only talks to this trait, so tests can record
/// charts without a font stack or a PNG encoder.
pub trait ChartSink {
    fn line_chart(&mut self, chart: &LineChart, path: &Path) -> Result<(), PlotError>;
    fn wind_rose(&mut self, chart: &WindRoseChart, path: &Path) -> Result<(), PlotError>;
}

/// Writes charts as PNG bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngRenderer {
    width: u32,
    height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1000,
        }
    }
}

impl PngRenderer {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl ChartSink for PngRenderer {
    fn line_chart(&mut self, chart: &LineChart, path: &Path) -> Result<(), PlotError> {
        prepare_parent(path)?;
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (x0, x1, y0, y1) = chart.bounds();
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let int_label = |x: &f64| format!("{x:.0}");
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .light_line_style(BLACK.mix(0.15));
        if let Some(labels) = chart.integer_x {
            mesh.x_labels(labels).x_label_formatter(&int_label);
        }
        mesh.draw().map_err(render_err)?;

        for hline in &chart.hlines {
            if !hline.value.is_finite() {
                continue;
            }
            let style = rgb(hline.color).stroke_width(2);
            let points = vec![(x0, hline.value), (x1, hline.value)];
            let anno = match hline.style {
                LineStyle::Solid => ctx.draw_series(PlotLine::new(points, style)),
                LineStyle::Dashed => ctx.draw_series(DashedLineSeries::new(points, 12, 6, style)),
            }
            .map_err(render_err)?;
            if let Some(label) = &hline.label {
                anno.label(label.as_str()).legend(move |(x, y)| legend_mark(x, y, style));
            }
        }

        for series in &chart.series {
            let color = rgb(series.color);
            let style = color.stroke_width(2);
            let points: Vec<(f64, f64)> = series.finite_points().collect();
            let anno = match series.style {
                LineStyle::Solid => ctx.draw_series(PlotLine::new(points.clone(), style)),
                LineStyle::Dashed => {
                    ctx.draw_series(DashedLineSeries::new(points.clone(), 12, 6, style))
                }
            }
            .map_err(render_err)?;
            anno.label(series.label.as_str())
                .legend(move |(x, y)| legend_mark(x, y, style));

            if series.markers {
                ctx.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
                    .map_err(render_err)?;
            }
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 20))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn wind_rose(&mut self, chart: &WindRoseChart, path: &Path) -> Result<(), PlotError> {
        prepare_parent(path)?;
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let body = root
            .titled(&chart.title, ("sans-serif", 36))
            .map_err(render_err)?;

        if !chart.panels.is_empty() {
            let areas = body.split_evenly((1, chart.panels.len()));
            for (area, panel) in areas.iter().zip(&chart.panels) {
                draw_rose(area, panel)?;
            }
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

/// One polar panel: reference rings, a wedge per sector scaled to the
/// largest frequency, and compass labels.
fn draw_rose(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &WindRosePanel) -> Result<(), PlotError> {
    let area = area
        .titled(&panel.label, ("sans-serif", 26))
        .map_err(render_err)?;
    let (w, h) = area.dim_in_pixel();
    let (cx, cy) = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.38;
    let peak = panel
        .frequencies
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(0.0_f64, f64::max);

    for k in 1..=4 {
        let r = radius * f64::from(k) / 4.0;
        area.draw(&Circle::new((cx, cy), r as i32, BLACK.mix(0.2)))
            .map_err(render_err)?;
        if peak > 0.0 {
            let text = format!("{:.0}%", peak * f64::from(k) / 4.0);
            area.draw(&Text::new(text, (cx + 4, cy - r as i32), ("sans-serif", 14)))
                .map_err(render_err)?;
        }
    }

    let sectors = panel.frequencies.len();
    if sectors > 0 && peak > 0.0 {
        let width = 360.0 / sectors as f64;
        let fill = rgb(panel.color).mix(0.7).filled();
        for (i, &freq) in panel.frequencies.iter().enumerate() {
            if !freq.is_finite() || freq <= 0.0 {
                continue;
            }
            let r = radius * freq / peak;
            let start = i as f64 * width;
            let mut points = vec![(cx, cy)];
            for step in 0..=8 {
                let angle = (start + width * f64::from(step) / 8.0).to_radians();
                points.push((
                    cx + (r * angle.sin()).round() as i32,
                    cy - (r * angle.cos()).round() as i32,
                ));
            }
            area.draw(&Polygon::new(points.clone(), fill))
                .map_err(render_err)?;
            points.push((cx, cy));
            area.draw(&PathElement::new(points, BLACK.stroke_width(1)))
                .map_err(render_err)?;
        }
    }

    let reach = radius as i32;
    for (label, (dx, dy)) in [
        ("N", (-6, -reach - 24)),
        ("E", (reach + 8, -8)),
        ("S", (-6, reach + 6)),
        ("W", (-reach - 24, -8)),
    ] {
        area.draw(&Text::new(label, (cx + dx, cy + dy), ("sans-serif", 20)))
            .map_err(render_err)?;
    }
    Ok(())
}

fn legend_mark(x: i32, y: i32, style: ShapeStyle) -> PathElement<(i32, i32)> {
    PathElement::new(vec![(x, y), (x + 20, y)], style)
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn prepare_parent(path: &Path) -> Result<(), PlotError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PlotError::Io {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
