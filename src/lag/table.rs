//! Forward-shifted lag table

use serde::{Deserialize, Serialize};

/// Forward values of the secondary return series at offsets `0..=max_lag`
///
/// Lag 0 is the same step as the row's timestamp; lag `k` is `k` steps later.
/// Entries past the end of the series are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagTable {
    max_lag: usize,
    rows: Vec<Vec<Option<f64>>>,
}

impl LagTable {
    /// Shift `values` forward by every offset up to `max_lag`
    pub fn build(values: &[Option<f64>], max_lag: usize) -> Self {
        let rows = (0..values.len())
            .map(|i| {
                (0..=max_lag)
                    .map(|k| values.get(i + k).copied().flatten())
                    .collect()
            })
            .collect();

        tracing::debug!(rows = values.len(), max_lag, "Built lag table");

        Self { max_lag, rows }
    }

    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Number of timestamps
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at timestamp index `row`, offset `lag`
    pub fn get(&self, row: usize, lag: usize) -> Option<f64> {
        self.rows.get(row)?.get(lag).copied().flatten()
    }

    /// All offsets for one timestamp
    pub fn row(&self, row: usize) -> Option<&[Option<f64>]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Defined values at `lag` for the rows selected by `mask`
    pub fn defined_at<'a>(
        &'a self,
        lag: usize,
        mask: impl Fn(usize) -> bool + 'a,
    ) -> impl Iterator<Item = f64> + 'a {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(i, _)| mask(*i))
            .filter_map(move |(_, row)| row.get(lag).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(n: usize) -> Vec<Option<f64>> {
        std::iter::once(None)
            .chain((1..n).map(|i| Some(i as f64 / 100.0)))
            .collect()
    }

    #[test]
    fn test_lag_zero_is_same_step() {
        let v = values(5);
        let table = LagTable::build(&v, 2);
        for i in 0..5 {
            assert_eq!(table.get(i, 0), v[i]);
        }
    }

    #[test]
    fn test_forward_shift() {
        let v = values(10);
        let table = LagTable::build(&v, 3);
        assert_eq!(table.len(), 10);
        assert_eq!(table.max_lag(), 3);
        for i in 0..10 {
            for k in 0..=3 {
                let expected = if i + k < 10 { v[i + k] } else { None };
                assert_eq!(table.get(i, k), expected);
            }
        }
        assert_eq!(table.get(2, 3), Some(0.05));
    }

    #[test]
    fn test_tail_entries_undefined() {
        let v = values(8);
        let table = LagTable::build(&v, 5);

        let defined = |i: usize| table.row(i).unwrap().iter().flatten().count();
        assert_eq!(defined(7), 1);
        assert_eq!(defined(6), 2);
        assert_eq!(defined(5), 3);
        assert_eq!(defined(1), 6);
        // Row 0 lag 0 hits the undefined first return
        assert_eq!(defined(0), 5);
        assert_eq!(table.row(7).unwrap().len(), 6);
    }

    #[test]
    fn test_max_lag_longer_than_series() {
        let v = values(3);
        let table = LagTable::build(&v, 90);
        assert_eq!(table.row(0).unwrap().len(), 91);
        assert_eq!(table.get(1, 1), Some(0.02));
        assert_eq!(table.get(1, 2), None);
        assert_eq!(table.get(5, 0), None);
    }

    #[test]
    fn test_defined_at_mask() {
        let v = values(6);
        let table = LagTable::build(&v, 2);
        let picked: Vec<f64> = table.defined_at(1, |i| i % 2 == 0).collect();
        // rows 0, 2, 4 at lag 1 => v[1], v[3], v[5]
        assert_eq!(picked, vec![0.01, 0.03, 0.05]);

        let tail: Vec<f64> = table.defined_at(2, |i| i >= 4).collect();
        assert!(tail.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let table = LagTable::build(&[], 10);
        assert!(table.is_empty());
        assert_eq!(table.rows().count(), 0);
    }
}
