//! Accumulated validation.

use crate::error::FetchError;

/// Accumulates validation errors and converts them into a single
/// [`FetchError::InvalidRequest`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Record `msg` when `ok` is false.
    pub(crate) fn check(&mut self, ok: bool, msg: impl FnOnce() -> String) {
        if !ok {
            self.errors.push(msg());
        }
    }

    /// `Ok(())` if nothing was recorded, otherwise every message joined with
    /// `"; "`.
    pub(crate) fn finish(self) -> Result<(), FetchError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FetchError::InvalidRequest {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
