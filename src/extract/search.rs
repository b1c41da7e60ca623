//! Binary-search primitives shared by every extractor backend.

use std::ops::Range;

use crate::index::ScanIndex;

/// Insertion position of `target` in an ascending view.
///
/// Returns the first index whose value is `>= target`, or `values.len()` if
/// every value is smaller. Returns 0 for an empty view.
///
/// ```rust
/// use mzxic::extract::lower_bound;
///
/// let sorted = [100.0, 200.0, 300.0, 400.0, 500.0];
/// assert_eq!(lower_bound(&sorted, 300.0), 2);
/// assert_eq!(lower_bound(&sorted, 250.0), 2);
/// assert_eq!(lower_bound(&sorted, 600.0), 5);
/// assert_eq!(lower_bound(&[], 1.0), 0);
/// ```
#[inline]
pub fn lower_bound(values: &[f32], target: f32) -> usize {
    values.partition_point(|&v| v < target)
}

/// Scan positions of `window_id` whose retention time lies in `[rt_min, rt_max]`.
///
/// Returns `None` for an unknown window; an empty range when nothing in the
/// window falls inside the RT interval.
#[inline]
pub(crate) fn rt_scan_range(
    index: &ScanIndex,
    window_id: u32,
    rt_min: f32,
    rt_max: f32,
) -> Option<Range<usize>> {
    let window = index.scan_range_for_window(window_id)?;
    let rts = &index.all_scan_rts()[window.clone()];

    let first = lower_bound(rts, rt_min);
    let last = first + rts[first..].partition_point(|&rt| rt <= rt_max);
    Some(window.start + first..window.start + last)
}
