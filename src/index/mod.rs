//! # Scan Index Module
//!
//! Immutable, columnar (Structure-of-Arrays) store of all DIA fragmentation
//! spectra, grouped by isolation window and ordered by retention time within
//! each window.
//!
//! ## Layout
//!
//! ```text
//! all_mz        [ s0p0 s0p1 s0p2 | s1p0 s1p1 | s2p0 ... ]   f32, ascending per scan
//! all_intensity [ s0p0 s0p1 s0p2 | s1p0 s1p1 | s2p0 ... ]   f32
//! per scan      offset, length, rt, window id, scan number
//! per window    scan_start, scan_count, lower/upper m/z bound
//! ```
//!
//! Scans of window `w` occupy positions `scan_start..scan_start + scan_count`
//! and are RT-ascending, so an RT interval maps to a binary-searchable
//! sub-range. Windows never share positions.
//!
//! Values are stored as `f32`; at typical fragment masses (100-2000 m/z) the
//! rounding error stays below 0.1 ppm.

mod builder;
mod error;
mod scan_index;
mod stats;
mod window;


pub use builder::ScanIndexBuilder;
pub use error::IndexError;
pub use scan_index::ScanIndex;
pub use stats::IndexStats;
pub use window::IsolationWindow;
