//! Sum-vs-mean aggregation policy.

use std::collections::BTreeSet;

/// How daily values are combined into a monthly or annual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Total over the period (accumulative variables such as precipitation).
    Sum,
    /// Average over the period (intensive variables such as temperature).
    Mean,
}

impl Aggregation {
    /// Reduce `values`, skipping `NaN`. Empty or all-missing input gives `NaN`.
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            Self::Sum => clima_stats::nan_sum(values),
            Self::Mean => clima_stats::nan_mean(values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
        }
    }
}

/// Chooses [`Aggregation::Sum`] for accumulative variables and
/// [`Aggregation::Mean`] for everything else.
#[derive(Debug, Clone)]
pub struct AggregationPolicy {
    accumulative: BTreeSet<String>,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self::new(["total_precipitation", "tp", "pr", "precipitation"])
    }
}

impl AggregationPolicy {
    /// Build a policy from the names of accumulative variables.
    pub fn new<I, S>(accumulative: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accumulative: accumulative.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark one more variable name as accumulative.
    pub fn with_accumulative(mut self, name: impl Into<String>) -> Self {
        self.accumulative.insert(name.into());
        self
    }

    /// Aggregation to use for `variable`.
    pub fn for_variable(&self, variable: &str) -> Aggregation {
        if self.accumulative.contains(variable) {
            Aggregation::Sum
        } else {
            Aggregation::Mean
        }
    }

    /// Whether `variable` is treated as accumulative.
    pub fn is_accumulative(&self, variable: &str) -> bool {
        self.accumulative.contains(variable)
    }
}
