//! Deviations from the historical baseline.

use crate::annual::AnnualValue;
use crate::monthly::MonthlyClimatology;

/// Scenario climatology minus baseline climatology, month by month.
pub fn monthly_anomaly(
    scenario: &MonthlyClimatology,
    baseline: &MonthlyClimatology,
) -> MonthlyClimatology {
    let mut out = [0.0; 12];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = scenario.values()[i] - baseline.values()[i];
    }
    MonthlyClimatology::new(out)
}

/// Each year's value minus a single baseline value.
///
/// Not cumulative: every year is compared with the historical mean on its own.
pub fn annual_anomaly(annual: &[AnnualValue], baseline_mean: f64) -> Vec<AnnualValue> {
    annual
        .iter()
        .map(|a| AnnualValue {
            year: a.year,
            value: a.value - baseline_mean,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_difference_all_twelve() {
        let base = MonthlyClimatology::new(std::array::from_fn(|i| i as f64));
        let scen = MonthlyClimatology::new(std::array::from_fn(|i| 2.0 * i as f64 + 1.0));
        let anom = monthly_anomaly(&scen, &base);
        for (m, v) in anom.iter() {
            let i = f64::from(m - 1);
            assert_eq!(v, i + 1.0);
        }
    }

    #[test]
    fn annual_against_scalar() {
        let annual = [
            AnnualValue { year: 2015, value: 26.0 },
            AnnualValue { year: 2016, value: 24.5 },
        ];
        let anom = annual_anomaly(&annual, 25.0);
        assert_eq!(anom[0], AnnualValue { year: 2015, value: 1.0 });
        assert_eq!(anom[1], AnnualValue { year: 2016, value: -0.5 });
    }
}
