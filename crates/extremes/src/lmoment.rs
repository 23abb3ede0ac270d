//! L-moment estimator for GEV parameters (Hosking, 1985).

use statrs::function::gamma::gamma;

use crate::error::ExtremesError;
use crate::gev::{GevParams, SHAPE_EPS};

/// Euler–Mascheroni constant.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Estimate GEV parameters from sample L-moments.
///
/// Closed form, so it is used as the starting point for the likelihood fit.
/// Non-finite values are ignored. Falls back to the Gumbel estimate when the
/// shape comes out degenerate.
///
/// # Errors
///
/// Returns [`ExtremesError::InsufficientData`] with fewer than three finite
/// values, and [`ExtremesError::ConstantData`] when they are all equal.
pub fn lmoment_estimate(sample: &[f64]) -> Result<GevParams, ExtremesError> {
    let x = clima_stats::sorted_finite(sample);
    let n = x.len();
    if n < 3 {
        return Err(ExtremesError::InsufficientData { n, min: 3 });
    }
    if x[n - 1] - x[0] <= f64::EPSILON * x[0].abs().max(1.0) {
        return Err(ExtremesError::ConstantData);
    }

    // Probability-weighted moments
    let nf = n as f64;
    let mut b0 = 0.0;
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for (i, &v) in x.iter().enumerate() {
        let j = i as f64;
        b0 += v;
        b1 += v * j / (nf - 1.0);
        b2 += v * j * (j - 1.0) / ((nf - 1.0) * (nf - 2.0));
    }
    b0 /= nf;
    b1 /= nf;
    b2 /= nf;

    let l1 = b0;
    let l2 = 2.0 * b1 - b0;
    let l3 = 6.0 * b2 - 6.0 * b1 + b0;
    let t3 = l3 / l2;

    let c = 2.0 / (3.0 + t3) - 2f64.ln() / 3f64.ln();
    // Hosking's k has the opposite sign to the climate-convention shape.
    let k = 7.8590 * c + 2.9554 * c * c;

    if k.abs() >= SHAPE_EPS && k > -1.0 {
        let g = gamma(1.0 + k);
        let scale = l2 * k / ((1.0 - 2f64.powf(-k)) * g);
        let location = l1 - scale * (1.0 - g) / k;
        if let Ok(params) = GevParams::new(location, scale, -k) {
            return Ok(params);
        }
    }

    gumbel_estimate(l1, l2)
}

/// Gumbel (ξ = 0) parameters from the first two L-moments.
fn gumbel_estimate(l1: f64, l2: f64) -> Result<GevParams, ExtremesError> {
    let scale = l2 / 2f64.ln();
    GevParams::new(l1 - EULER_GAMMA * scale, scale, 0.0)
}
