//! Wind direction and wind-rose frequencies from u/v components.

use crate::error::ClimatologyError;

/// Direction the wind blows *from*, in degrees clockwise from north
/// (meteorological convention), for each `(u, v)` pair.
///
/// Pairs with a missing component give `NaN`.
///
/// # Errors
///
/// Returns [`ClimatologyError::LengthMismatch`] if `u` and `v` differ in
/// length.
pub fn wind_direction(u: &[f64], v: &[f64]) -> Result<Vec<f64>, ClimatologyError> {
    if u.len() != v.len() {
        return Err(ClimatologyError::LengthMismatch {
            left: u.len(),
            right: v.len(),
        });
    }
    Ok(u.iter()
        .zip(v)
        .map(|(&u, &v)| ((-u).atan2(-v).to_degrees() + 360.0) % 360.0)
        .collect())
}

/// Percentage of observations per direction sector.
///
/// Sector `i` covers `[i * width, (i + 1) * width)` degrees, starting at north.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRose {
    frequencies: Vec<f64>,
    count: usize,
}

impl WindRose {
    /// Bin `directions` (degrees) into `sectors` equal sectors.
    ///
    /// Returns `Ok(None)` when no direction is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::NoSectors`] if `sectors` is zero.
    pub fn from_directions(directions: &[f64], sectors: usize) -> Result<Option<Self>, ClimatologyError> {
        if sectors == 0 {
            return Err(ClimatologyError::NoSectors);
        }
        let width = 360.0 / sectors as f64;
        let mut counts = vec![0usize; sectors];
        let mut count = 0;
        for &d in directions.iter().filter(|d| d.is_finite()) {
            let idx = ((d.rem_euclid(360.0) / width) as usize).min(sectors - 1);
            counts[idx] += 1;
            count += 1;
        }
        if count == 0 {
            return Ok(None);
        }
        let frequencies = counts
            .iter()
            .map(|&c| c as f64 / count as f64 * 100.0)
            .collect();
        Ok(Some(Self { frequencies, count }))
    }

    /// Frequency of each sector in percent; sums to 100.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn sectors(&self) -> usize {
        self.frequencies.len()
    }

    /// Sector width in degrees.
    pub fn sector_width(&self) -> f64 {
        360.0 / self.frequencies.len() as f64
    }

    /// Number of finite directions that were binned.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cardinal_directions() {
        // Southward-blowing wind (v < 0) comes from the north.
        let dirs = wind_direction(&[0.0, -1.0, 0.0, 1.0], &[-1.0, 0.0, 1.0, 0.0]).unwrap();
        assert_relative_eq!(dirs[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(dirs[1], 90.0, epsilon = 1e-9);
        assert_relative_eq!(dirs[2], 180.0, epsilon = 1e-9);
        assert_relative_eq!(dirs[3], 270.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_component_gives_nan() {
        let dirs = wind_direction(&[f64::NAN], &[1.0]).unwrap();
        assert!(dirs[0].is_nan());
    }

    #[test]
    fn rose_frequencies_sum_to_hundred() {
        let dirs = [0.0, 10.0, 90.0, 359.9, f64::NAN];
        let rose = WindRose::from_directions(&dirs, 16).unwrap().unwrap();
        assert_eq!(rose.count(), 4);
        assert_eq!(rose.sectors(), 16);
        assert_relative_eq!(rose.sector_width(), 22.5);
        assert_relative_eq!(rose.frequencies()[0], 50.0);
        assert_relative_eq!(rose.frequencies()[4], 25.0);
        assert_relative_eq!(rose.frequencies()[15], 25.0);
        assert_relative_eq!(rose.frequencies().iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn rose_none_without_finite_directions() {
        assert!(WindRose::from_directions(&[f64::NAN], 16).unwrap().is_none());
        assert!(WindRose::from_directions(&[], 16).unwrap().is_none());
    }

    #[test]
    fn rose_zero_sectors_rejected() {
        assert_eq!(
            WindRose::from_directions(&[1.0], 0).unwrap_err(),
            ClimatologyError::NoSectors
        );
    }
}
