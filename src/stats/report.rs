//! Terminal report for lag statistics

use std::fmt::Write;

use super::types::{LagStatistic, LagStatsTable};
use crate::anomaly::EventKind;

fn cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn stat_cells(stat: Option<&LagStatistic>, alpha: f64) -> String {
    match stat {
        Some(s) => format!(
            "{:>5} {:>10} {:>10} {:>8} {:>8}{}",
            s.count,
            cell(Some(s.mean), 5),
            cell(s.std_dev, 5),
            cell(s.t_statistic, 2),
            cell(s.p_value, 4),
            if s.is_significant(alpha) { "*" } else { " " }
        ),
        None => format!("{:>5} {:>10} {:>10} {:>8} {:>8} ", "-", "-", "-", "-", "-"),
    }
}

impl LagStatsTable {
    /// Format as a fixed-width table for CLI output; `*` marks p < alpha
    pub fn format_table(&self, alpha: f64) -> String {
        let mut out = String::new();
        let rule = "═".repeat(100);
        let thin = "─".repeat(100);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "  LAG STATISTICS  (max lag {}, min samples {}, alpha {})",
            self.max_lag, self.min_samples, alpha
        );
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:>4} │ {:^46}│ {:^46}",
            "lag", "PEAK", "TROUGH"
        );
        let _ = writeln!(
            out,
            "{:>4} │ {:>5} {:>10} {:>10} {:>8} {:>8}  │ {:>5} {:>10} {:>10} {:>8} {:>8}",
            "", "n", "mean", "std", "t", "p", "n", "mean", "std", "t", "p"
        );
        let _ = writeln!(out, "{thin}");

        for record in self.records() {
            let _ = writeln!(
                out,
                "{:>4} │ {} │ {}",
                record.lag,
                stat_cells(record.peak.as_ref(), alpha),
                stat_cells(record.trough.as_ref(), alpha)
            );
        }

        let _ = writeln!(out, "{thin}");
        for kind in EventKind::ALL {
            let lags = self.significant(kind, alpha);
            let listed = if lags.is_empty() {
                "none".to_string()
            } else {
                lags.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            };
            let _ = writeln!(
                out,
                "{:<7} lags emitted: {:>3}   significant: {}",
                kind.as_str(),
                self.emitted(kind),
                listed
            );
        }
        let _ = writeln!(out, "{rule}");

        out
    }
}
