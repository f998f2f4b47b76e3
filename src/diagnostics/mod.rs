//! Reports and timing traces returned by the pipeline and written by the
//! demo tools.
//!
//! `ClearanceReport` bundles the fitted circle, the per-sector readings and a
//! `TimingBreakdown` of every stage that ran.

pub mod report;
pub mod timing;

pub use report::{ClearanceReport, StageCounts};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
