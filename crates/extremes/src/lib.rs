//! # clima-extremes
//!
//! Generalized extreme-value (GEV) fitting of annual maxima and return-level
//! estimation.
//!
//! ```mermaid
//! graph LR
//!     A["annual maxima"] -->|"lmoment_estimate"| B["start GevParams"]
//!     B -->|"fit_gev (Nelder-Mead MLE)"| C["GevParams"]
//!     C -->|".return_level(T)"| D["level exceeded once per T years"]
//! ```
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | μ | [`GevParams::location()`] | Location |
//! | σ | [`GevParams::scale()`] | Scale, strictly positive |
//! | ξ | [`GevParams::shape()`] | Shape; `> 0` heavy tail, `0` Gumbel, `< 0` bounded |

mod error;
mod fit;
mod gev;
mod lmoment;

pub use error::ExtremesError;
pub use fit::{DEFAULT_RETURN_PERIODS, MIN_SAMPLE, fit_gev, return_levels};
pub use gev::GevParams;
pub use lmoment::lmoment_estimate;
