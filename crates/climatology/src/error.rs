//! Error types for clima-climatology.

/// Errors that can occur while aggregating a series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Two slices that must be parallel have different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A wind rose was requested with zero sectors.
    #[error("wind rose needs at least one sector")]
    NoSectors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = ClimatologyError::LengthMismatch { left: 3, right: 4 };
        assert_eq!(err.to_string(), "length mismatch: 3 vs 4");
    }
}
