//! Error types for clima-plot.

use std::path::PathBuf;

/// Error type for chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Wraps a drawing-backend failure.
    #[error("render error: {reason}")]
    Render {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when the output location cannot be prepared.
    #[error("i/o error at {}: {reason}", path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },
}

pub(crate) fn render_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::Render {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_render() {
        assert_eq!(render_err("no font").to_string(), "render error: no font");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<PlotError>();
    }
}
