#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;

// Geometry internals – public for tooling and tests.
pub mod angle;
pub mod config;
pub mod edges;
pub mod hough;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{HoughDetector, HoughGrid, HoughParams, Region, RegionLayout};
pub use crate::diagnostics::{HoughObserver, HoughReport};
pub use crate::edges::{AccelClass, GradientFrame, ZeroCrossing};
pub use crate::error::HoughError;
pub use crate::hough::{HoughBucket, HoughLocal, Stage};

// --- Prelude ---------------------------------------------------------------

/// Everything needed to run a pass over prebuilt accelerator grids.
pub mod prelude {
    pub use crate::edges::{AccelClass, GradientFrame};
    pub use crate::image::{AccelGrid, EdgeOrientation, ValueGrid};
    pub use crate::{HoughDetector, HoughObserver, HoughParams, RegionLayout, Stage};
}
