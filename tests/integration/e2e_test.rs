//! End-to-end pipeline tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use event_lag::anomaly::{AnomalyConfig, EventFlag, EventKind};
use event_lag::error::{AlignmentError, StudyError};
use event_lag::pipeline::{run_study, StudyConfig};
use event_lag::series::Series;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 8, 1, 0, 0, 0).unwrap()
}

fn daily(label: &str, values: &[f64]) -> Series {
    Series::new(
        label,
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (start() + Duration::days(i as i64), *v))
            .collect(),
    )
    .unwrap()
}

/// Prices whose returns alternate +/-0.1% with a +5% jump every 40 steps
fn spiky_prices(n: usize) -> (Vec<f64>, Vec<usize>) {
    let spikes: Vec<usize> = (1..=10).map(|k| k * 40).filter(|i| *i < n).collect();
    let mut prices = vec![100.0];
    for i in 1..n {
        let r = if spikes.contains(&i) {
            0.05
        } else if i % 2 == 0 {
            0.001
        } else {
            -0.001
        };
        let prev = prices[i - 1];
        prices.push(prev * (1.0 + r));
    }
    (prices, spikes)
}

#[test]
fn test_single_jump_matches_hand_computed_zscore() {
    let oil = daily("oil", &[100.0, 100.0, 100.0, 200.0, 100.0, 100.0, 100.0]);
    let vix = daily("vix", &[20.0, 21.0, 22.0, 23.0, 24.0, 25.0, 26.0]);
    let config = StudyConfig {
        anomaly: AnomalyConfig {
            window: 3,
            threshold: 2.0,
        },
        max_lag: 2,
        min_samples: 10,
    };

    let result = run_study(&oil, &vix, &config).unwrap();
    let rows = &result.events.rows;

    // Returns [-, 0, 0, 1, -0.5, 0, 0]; window [0, 0, 1] has mean 1/3, std sqrt(1/3)
    let hand = (1.0 - 1.0 / 3.0) / (1.0_f64 / 3.0).sqrt();
    assert!((rows[3].zscore.unwrap() - hand).abs() < 1e-9);
    // The jump only flags if it clears the threshold, and 2/sqrt(3) does not
    assert_eq!(rows[3].flag, EventFlag::None);

    // Window [0, 1, -0.5]: mean 1/6
    let m: f64 = 1.0 / 6.0;
    let var = ((0.0 - m).powi(2) + (1.0 - m).powi(2) + (-0.5 - m).powi(2)) / 2.0;
    assert!((rows[4].zscore.unwrap() - (-0.5 - m) / var.sqrt()).abs() < 1e-9);

    assert!(rows.iter().all(|r| r.flag == EventFlag::None));
    assert!(result.stats.is_empty());
}

#[test]
fn test_ten_peaks_with_identical_reaction() {
    let (prices, spikes) = spiky_prices(420);
    assert_eq!(spikes.len(), 10);
    // Doubling every step: every secondary return is exactly 1
    let vix: Vec<f64> = (0..420).map(|i| 2f64.powi(i)).collect();

    let config = StudyConfig {
        max_lag: 5,
        ..StudyConfig::default()
    };
    let result = run_study(&daily("oil", &prices), &daily("vix", &vix), &config).unwrap();

    let peaks: Vec<usize> = result
        .events
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.flag == EventFlag::Peak)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(peaks, spikes);
    assert_eq!(result.events.events(EventKind::Trough).count(), 0);

    for lag in 0..=5 {
        let stat = result.stats.stat(lag, EventKind::Peak).unwrap();
        assert_eq!(stat.count, 10);
        assert_eq!(stat.mean, 1.0);
        assert_eq!(stat.std_dev, Some(0.0));
        assert_eq!(stat.t_statistic, None);
        assert!(result.stats.stat(lag, EventKind::Trough).is_none());
    }
    assert_eq!(result.stats.len(), 6);
}

#[test]
fn test_reaction_significance_detected() {
    let (prices, spikes) = spiky_prices(420);
    // Secondary jumps 10% two steps after each spike, otherwise a small wiggle
    let mut vix = vec![20.0];
    for i in 1..420 {
        let r = if spikes.iter().any(|s| s + 2 == i) {
            0.10 + 0.001 * (i % 3) as f64
        } else if i % 2 == 0 {
            0.002
        } else {
            -0.002
        };
        let prev = vix[i - 1];
        vix.push(prev * (1.0 + r));
    }

    let config = StudyConfig {
        max_lag: 4,
        ..StudyConfig::default()
    };
    let result = run_study(&daily("oil", &prices), &daily("vix", &vix), &config).unwrap();

    let lag2 = result.stats.stat(2, EventKind::Peak).unwrap();
    assert!(lag2.mean > 0.09);
    assert!(lag2.p_value.unwrap() < 0.001);
    assert_eq!(result.stats.significant(EventKind::Peak, 0.05), vec![2]);
}

#[test]
fn test_pipeline_is_deterministic() {
    let (prices, _) = spiky_prices(300);
    let vix: Vec<f64> = (0..300)
        .map(|i| 20.0 + 3.0 * ((i as f64) * 0.41).sin())
        .collect();
    let oil = daily("oil", &prices);
    let vix = daily("vix", &vix);

    let first = run_study(&oil, &vix, &StudyConfig::default()).unwrap();
    let second = run_study(&oil, &vix, &StudyConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_misaligned_inputs_abort() {
    let oil = daily("oil", &[70.0, 71.0, 72.0]);
    let vix = Series::new(
        "vix",
        vec![(start() + Duration::hours(12), 20.0), (start() + Duration::hours(36), 21.0)],
    )
    .unwrap();

    let err = run_study(&oil, &vix, &StudyConfig::default()).unwrap_err();
    assert_eq!(
        err,
        StudyError::Alignment(AlignmentError::NoCommonTimestamps {
            primary: "oil".to_string(),
            secondary: "vix".to_string(),
        })
    );
}

#[test]
fn test_gaps_are_dropped_before_returns() {
    // vix is missing day 2, so the oil return on day 3 is measured from day 1
    let oil = daily("oil", &[100.0, 150.0, 110.0, 121.0]);
    let vix = Series::new(
        "vix",
        vec![
            (start(), 20.0),
            (start() + Duration::days(2), 22.0),
            (start() + Duration::days(3), 11.0),
        ],
    )
    .unwrap();
    let config = StudyConfig {
        anomaly: AnomalyConfig {
            window: 2,
            threshold: 2.0,
        },
        max_lag: 1,
        min_samples: 1,
    };

    let result = run_study(&oil, &vix, &config).unwrap();
    let rows = &result.events.rows;
    assert_eq!(rows.len(), 3);
    assert!((rows[1].primary_return.unwrap() - 0.10).abs() < 1e-12);
    assert!((rows[1].secondary_return.unwrap() - 0.10).abs() < 1e-12);
    assert_eq!(rows[2].secondary_return, Some(-0.5));
}

#[test]
fn test_final_row_has_only_lag_zero() {
    let (prices, _) = spiky_prices(120);
    let vix: Vec<f64> = (0..120).map(|i| 20.0 + (i % 7) as f64).collect();
    let result = run_study(&daily("oil", &prices), &daily("vix", &vix), &StudyConfig::default())
        .unwrap();

    let lags = &result.events.lags;
    let last = lags.row(lags.len() - 1).unwrap();
    assert_eq!(last.len(), 91);
    assert_eq!(last.iter().flatten().count(), 1);
    assert!(last[0].is_some());
}
