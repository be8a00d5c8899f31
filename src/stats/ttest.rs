//! One-sample Student's t-test

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::{is_zero_std, mean, sample_std};

/// Result of a one-sample t-test. Undefined quantities are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTest {
    pub t_statistic: Option<f64>,
    /// Two-sided p-value
    pub p_value: Option<f64>,
    pub degrees_of_freedom: Option<f64>,
}

impl TTest {
    fn undefined(degrees_of_freedom: Option<f64>) -> Self {
        Self {
            t_statistic: None,
            p_value: None,
            degrees_of_freedom,
        }
    }
}

/// Test whether the mean of `values` differs from `hypothesized_mean`
///
/// Fewer than two values, or a sample with no spread, gives an undefined
/// statistic rather than a division by zero.
pub fn one_sample_t_test(values: &[f64], hypothesized_mean: f64) -> TTest {
    let n = values.len();
    if n < 2 {
        return TTest::undefined(None);
    }
    let df = (n - 1) as f64;

    let (Some(m), Some(std)) = (mean(values), sample_std(values)) else {
        return TTest::undefined(Some(df));
    };
    if is_zero_std(std, values) {
        return TTest::undefined(Some(df));
    }

    let t = (m - hypothesized_mean) / (std / (n as f64).sqrt());
    let p_value = StudentsT::new(0.0, 1.0, df)
        .ok()
        .map(|dist| (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0));

    TTest {
        t_statistic: Some(t),
        p_value,
        degrees_of_freedom: Some(df),
    }
}
