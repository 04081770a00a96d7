use crate::edges::AccelClass;
use crate::hough::Stage;
use crate::image::EdgeOrientation;
use core::fmt;

/// Failures surfaced by a Hough pass.
///
/// Out-of-range geometry is not an error: offsets, angles and raw-gradient
/// lookups that fall outside their valid range simply drop the contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoughError {
    /// An accumulator (or the arena holding it) could not be reserved.
    Allocation {
        stage: Stage,
        region: usize,
        requested_bytes: usize,
    },
    /// A grid buffer does not hold `width × height` values.
    SizeMismatch { expected: usize, actual: usize },
    /// An accelerator was registered under a class of the other orientation.
    OrientationMismatch {
        class: AccelClass,
        expected: EdgeOrientation,
        actual: EdgeOrientation,
    },
}

impl fmt::Display for HoughError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation {
                stage,
                region,
                requested_bytes,
            } => write!(
                f,
                "failed to allocate {stage:?} accumulator for region {region} \
                 ({requested_bytes} bytes)"
            ),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OrientationMismatch {
                class,
                expected,
                actual,
            } => write!(
                f,
                "accelerator {class:?} must be {expected:?}, got {actual:?}"
            ),
        }
    }
}

impl std::error::Error for HoughError {}
