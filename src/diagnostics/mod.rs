//! Observation hooks and reports for a Hough pass.
//!
//! The detector never depends on what an observer does: callbacks receive
//! finished accumulators and detected crossings after the fact.
//! [`HoughReport`] is the structured summary returned by
//! [`HoughDetector::populate_with_diagnostics`](crate::HoughDetector).

pub mod dump;
pub mod report;
pub mod timing;

pub use dump::AccumulatorDump;
pub use report::{AccumulatorSummary, HoughReport, InputDescriptor, RegionSummary};
pub use timing::{StageTiming, TimingBreakdown};

use crate::detector::Region;
use crate::edges::{AccelClass, ZeroCrossing};
use crate::hough::{HoughLocal, Stage};

/// Receives per-stage accumulators and display-filtered crossings.
///
/// For every region the calls arrive as: crossings, then `Line`, `Maxima`
/// and `Vanish`; regions are reported in id order.
pub trait HoughObserver {
    fn on_accumulator(&mut self, _region: &Region, _local: &HoughLocal, _stage: Stage) {}

    fn on_zero_crossing(&mut self, _region: &Region, _class: AccelClass, _edge: &ZeroCrossing) {}
}

/// Observer that ignores everything.
impl HoughObserver for () {}
