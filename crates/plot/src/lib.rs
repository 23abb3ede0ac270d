//! # clima-plot
//!
//! Chart descriptions ([`LineChart`], [`WindRoseChart`]) are plain data;
//! a [`ChartSink`] turns them into output. [`PngRenderer`] is the plotters
//! bitmap implementation.

mod chart;
mod color;
mod error;
mod render;

pub use chart::{HLine, LineChart, LineSeries, LineStyle, WindRoseChart, WindRosePanel};
pub use color::{GRAY, GREEN, ORANGE, Rgb, series_color};
pub use error::PlotError;
pub use render::{ChartSink, PngRenderer};
