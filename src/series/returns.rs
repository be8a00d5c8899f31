//! Return transformer

use super::types::{AlignedSeries, ReturnPoint};

/// Percentage change between each value and its predecessor
///
/// Output has the same length as the input. Index 0 is always `None`; so is
/// any point whose predecessor is zero.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|w| {
        let (prev, curr) = (w[0], w[1]);
        if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
            None
        } else {
            Some(curr / prev - 1.0)
        }
    }));
    out
}

/// Convert an aligned level table into per-timestamp returns
pub fn to_returns(aligned: &AlignedSeries) -> Vec<ReturnPoint> {
    let primary = pct_change(&aligned.primary_values());
    let secondary = pct_change(&aligned.secondary_values());

    aligned
        .points
        .iter()
        .zip(primary)
        .zip(secondary)
        .map(|((point, p), s)| ReturnPoint {
            timestamp: point.timestamp,
            primary: p,
            secondary: s,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimePoint;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_pct_change_basic() {
        let returns = pct_change(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 3);
        assert!(returns[0].is_none());
        assert!((returns[1].unwrap() - 0.10).abs() < 1e-12);
        assert!((returns[2].unwrap() - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn test_pct_change_one_fewer_defined() {
        let values = [50.0, 51.0, 49.5, 52.25, 52.25, 60.0];
        let returns = pct_change(&values);
        assert_eq!(returns.iter().flatten().count(), values.len() - 1);
        for i in 1..values.len() {
            let expected = values[i] / values[i - 1] - 1.0;
            assert!((returns[i].unwrap() - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn test_pct_change_zero_predecessor_is_undefined() {
        let returns = pct_change(&[0.0, 5.0, 10.0]);
        assert_eq!(returns[1], None);
        assert_eq!(returns[2], Some(1.0));
    }

    #[test]
    fn test_pct_change_empty_and_single() {
        assert!(pct_change(&[]).is_empty());
        assert_eq!(pct_change(&[42.0]), vec![None]);
    }

    #[test]
    fn test_to_returns_keeps_timestamps() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let aligned = AlignedSeries {
            primary_label: "oil".to_string(),
            secondary_label: "vix".to_string(),
            points: (0..3)
                .map(|i| TimePoint {
                    timestamp: start + Duration::days(i),
                    primary: 100.0 * (i + 1) as f64,
                    secondary: 20.0,
                })
                .collect(),
        };

        let returns = to_returns(&aligned);
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0].primary, None);
        assert_eq!(returns[0].secondary, None);
        assert_eq!(returns[1].primary, Some(1.0));
        assert_eq!(returns[1].secondary, Some(0.0));
        assert!((returns[2].primary.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(returns[2].timestamp, start + Duration::days(2));
    }
}
