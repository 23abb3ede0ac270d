//! Statistical helper functions shared by the clima crates.
//!
//! Model output carries missing values as `NaN`. The `nan_*` reductions skip
//! them and return `NaN` when nothing finite is left, so a fully missing
//! group stays visibly missing instead of collapsing to zero.

/// Finite values of `data`, in their original order.
pub fn finite(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Finite values of `data`, sorted ascending.
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut values = finite(data);
    values.sort_by(f64::total_cmp);
    values
}

/// Mean of the finite values. `NaN` if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let (sum, count) = finite_sum_count(data);
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Sum of the finite values. `NaN` if there are none.
pub fn nan_sum(data: &[f64]) -> f64 {
    let (sum, count) = finite_sum_count(data);
    if count == 0 { f64::NAN } else { sum }
}

/// Maximum of the finite values. `NaN` if there are none.
pub fn nan_max(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.max(x))))
        .unwrap_or(f64::NAN)
}

fn finite_sum_count(data: &[f64]) -> (f64, usize) {
    data.iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0), |(sum, count), &x| (sum + x, count + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nan_mean_skips_missing() {
        let data = [1.0, f64::NAN, 3.0, f64::INFINITY];
        assert_relative_eq!(nan_mean(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_all_missing() {
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_sum() {
        assert_relative_eq!(nan_sum(&[0.5, f64::NAN, 1.5]), 2.0, epsilon = 1e-12);
        assert!(nan_sum(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_nan_max() {
        assert_eq!(nan_max(&[-3.0, f64::NAN, -1.0, -2.0]), -1.0);
        assert!(nan_max(&[]).is_nan());
    }

    #[test]
    fn test_sorted_finite() {
        let sorted = sorted_finite(&[3.0, f64::NAN, -1.0, 2.0]);
        assert_eq!(sorted, vec![-1.0, 2.0, 3.0]);
    }
}
