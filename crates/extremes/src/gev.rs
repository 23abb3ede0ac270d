//! Generalized extreme-value distribution parameters.

use crate::error::ExtremesError;

/// Below this magnitude the shape is treated as zero (Gumbel limit).
pub(crate) const SHAPE_EPS: f64 = 1e-6;

/// Validated GEV parameters.
///
/// Uses the climate convention for the shape: `ξ > 0` is the heavy-tailed
/// (Fréchet) family, `ξ < 0` is bounded above (Weibull), `ξ = 0` is Gumbel.
///
/// ```text
/// F(x) = exp(-(1 + ξ (x - μ) / σ)^(-1/ξ))
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GevParams {
    location: f64,
    scale: f64,
    shape: f64,
}

impl GevParams {
    /// # Errors
    ///
    /// Returns [`ExtremesError::InvalidParams`] if any parameter is not
    /// finite or `scale` is not strictly positive.
    pub fn new(location: f64, scale: f64, shape: f64) -> Result<Self, ExtremesError> {
        if !location.is_finite() || !shape.is_finite() {
            return Err(ExtremesError::InvalidParams {
                reason: format!("location={location}, shape={shape} must be finite"),
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ExtremesError::InvalidParams {
                reason: format!("scale={scale} must be finite and positive"),
            });
        }
        Ok(Self {
            location,
            scale,
            shape,
        })
    }

    /// Location (μ).
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Scale (σ).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shape (ξ).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Cumulative probability of `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.location) / self.scale;
        if self.shape.abs() < SHAPE_EPS {
            return (-(-z).exp()).exp();
        }
        let t = 1.0 + self.shape * z;
        if t <= 0.0 {
            // Outside the support: below it for ξ > 0, above it for ξ < 0.
            return if self.shape > 0.0 { 0.0 } else { 1.0 };
        }
        (-t.powf(-1.0 / self.shape)).exp()
    }

    /// Value with non-exceedance probability `p`, for `p` in (0, 1).
    pub fn quantile(&self, p: f64) -> f64 {
        let y = -p.ln();
        if self.shape.abs() < SHAPE_EPS {
            self.location - self.scale * y.ln()
        } else {
            self.location + self.scale / self.shape * (y.powf(-self.shape) - 1.0)
        }
    }

    /// Level exceeded on average once every `period` years.
    ///
    /// # Errors
    ///
    /// Returns [`ExtremesError::InvalidReturnPeriod`] if `period` is not
    /// finite or not greater than 1.
    pub fn return_level(&self, period: f64) -> Result<f64, ExtremesError> {
        if !period.is_finite() || period <= 1.0 {
            return Err(ExtremesError::InvalidReturnPeriod { period });
        }
        Ok(self.quantile(1.0 - 1.0 / period))
    }

    /// Log-likelihood of `data`. `None` if any point is outside the support.
    pub fn log_likelihood(&self, data: &[f64]) -> Option<f64> {
        let n = data.len() as f64;
        let mut ll = -n * self.scale.ln();
        if self.shape.abs() < SHAPE_EPS {
            for &x in data {
                let z = (x - self.location) / self.scale;
                ll -= z + (-z).exp();
            }
        } else {
            let inv = 1.0 / self.shape;
            for &x in data {
                let t = 1.0 + self.shape * (x - self.location) / self.scale;
                if t <= 0.0 {
                    return None;
                }
                ll -= (1.0 + inv) * t.ln() + t.powf(-inv);
            }
        }
        ll.is_finite().then_some(ll)
    }
}
