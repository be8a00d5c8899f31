//! Series aligner
//!
//! Inner join of two ascending series on timestamp.

use std::cmp::Ordering;

use super::types::{AlignedSeries, Series, TimePoint};
use crate::error::AlignmentError;

/// Join two series, keeping only timestamps present in both
///
/// Both inputs are strictly ascending (guaranteed by [`Series::new`]), so a
/// single merge pass suffices and the output is ascending as well.
pub fn align(primary: &Series, secondary: &Series) -> Result<AlignedSeries, AlignmentError> {
    if primary.is_empty() {
        return Err(AlignmentError::EmptySeries(primary.label().to_string()));
    }
    if secondary.is_empty() {
        return Err(AlignmentError::EmptySeries(secondary.label().to_string()));
    }

    let left = primary.points();
    let right = secondary.points();
    let mut points = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (lt, lv) = left[i];
        let (rt, rv) = right[j];
        match lt.cmp(&rt) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                points.push(TimePoint {
                    timestamp: lt,
                    primary: lv,
                    secondary: rv,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if points.is_empty() {
        return Err(AlignmentError::NoCommonTimestamps {
            primary: primary.label().to_string(),
            secondary: secondary.label().to_string(),
        });
    }

    tracing::debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        aligned = points.len(),
        dropped = primary.len() + secondary.len() - 2 * points.len(),
        "Aligned series"
    );

    Ok(AlignedSeries {
        primary_label: primary.label().to_string(),
        secondary_label: secondary.label().to_string(),
        points,
    })
}
