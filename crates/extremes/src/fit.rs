//! Maximum-likelihood GEV fit.
//!
//! Wraps `argmin`'s Nelder-Mead to minimise the negative log-likelihood over
//! `(μ, ln σ, ξ)`, so the scale stays positive without constraints.

use std::collections::BTreeMap;

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;

use crate::error::ExtremesError;
use crate::gev::GevParams;
use crate::lmoment::lmoment_estimate;

/// Minimum number of finite annual maxima for a fit.
pub const MIN_SAMPLE: usize = 5;

/// Return periods (years) evaluated when none are configured.
pub const DEFAULT_RETURN_PERIODS: [u32; 3] = [10, 20, 50];

/// The GEV likelihood has no finite maximum for ξ ≤ -1; very large ξ is not
/// physically meaningful for annual maxima.
const SHAPE_BOUNDS: (f64, f64) = (-1.0, 1.0);

/// Fit a GEV to `sample` by maximum likelihood.
///
/// 1. Drop non-finite values and validate
/// 2. Start from the L-moment estimate (Gumbel if that start is infeasible)
/// 3. Minimise the negative log-likelihood with Nelder-Mead
///
/// # Errors
///
/// - [`ExtremesError::InsufficientData`] with fewer than [`MIN_SAMPLE`]
///   finite values
/// - [`ExtremesError::ConstantData`] when all values are equal
/// - [`ExtremesError::OptimizationFailed`] if the optimiser fails
pub fn fit_gev(sample: &[f64]) -> Result<GevParams, ExtremesError> {
    let data = clima_stats::finite(sample);
    if data.len() < MIN_SAMPLE {
        return Err(ExtremesError::InsufficientData {
            n: data.len(),
            min: MIN_SAMPLE,
        });
    }

    let start = lmoment_estimate(&data)?;
    let cost = GevCost { data: &data };

    let mut x0 = vec![start.location(), start.scale().ln(), start.shape()];
    if cost.evaluate(&x0) == f64::MAX {
        x0[2] = 0.0;
    }

    // Initial simplex: start point plus one step along each axis
    let steps = [0.1 * start.scale(), 0.1, 0.05];
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(4);
    simplex.push(x0.clone());
    for (i, step) in steps.iter().enumerate() {
        let mut vertex = x0.clone();
        vertex[i] += step;
        simplex.push(vertex);
    }

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-8)
        .map_err(|_| ExtremesError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(2000))
        .run()
        .map_err(|_| ExtremesError::OptimizationFailed)?;

    let best = result
        .state()
        .best_param
        .as_ref()
        .ok_or(ExtremesError::OptimizationFailed)?;

    GevParams::new(best[0], best[1].exp(), best[2])
}

/// Fit once, then evaluate each return period.
///
/// # Errors
///
/// Propagates [`fit_gev`] errors, and [`ExtremesError::InvalidReturnPeriod`]
/// for any period of 1 year or less.
pub fn return_levels(sample: &[f64], periods: &[u32]) -> Result<BTreeMap<u32, f64>, ExtremesError> {
    let params = fit_gev(sample)?;
    periods
        .iter()
        .map(|&p| Ok((p, params.return_level(f64::from(p))?)))
        .collect()
}

/// Cost function for argmin: negative log-likelihood.
struct GevCost<'a> {
    data: &'a [f64],
}

impl GevCost<'_> {
    fn evaluate(&self, params: &[f64]) -> f64 {
        let (location, log_scale, shape) = (params[0], params[1], params[2]);
        if shape <= SHAPE_BOUNDS.0 || shape >= SHAPE_BOUNDS.1 {
            return f64::MAX;
        }
        match GevParams::new(location, log_scale.exp(), shape)
            .ok()
            .and_then(|p| p.log_likelihood(self.data))
        {
            Some(ll) => -ll,
            None => f64::MAX,
        }
    }
}

impl CostFunction for GevCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.evaluate(params))
    }
}
