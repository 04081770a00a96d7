//! Edge localisation on the six gradient accelerators.
//!
//! Each accelerator belongs to one orientation class. A class fixes the
//! accelerator's stepping direction and owns a contiguous band of Hough angle
//! buckets; the six bands tile all 128 buckets, the vertical band wrapping
//! across the 0/127 seam.
//!
//! - [`zero_crossing`] – sub-pixel sign-change detector.

pub mod zero_crossing;

pub use zero_crossing::{detect_zero_crossing, ZeroCrossing};

use crate::angle::ANGLE_BUCKETS;
use crate::error::HoughError;
use crate::image::{AccelGrid, EdgeOrientation};
use serde::{Deserialize, Serialize};

/// Orientation class of an accelerator grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelClass {
    /// Vertical edges from the vertical raw gradient.
    Vertical,
    /// Vertical stepping over the backslash-diagonal raw gradient.
    VerticalBackslash,
    /// Horizontal stepping over the backslash-diagonal raw gradient.
    HorizontalBackslash,
    /// Horizontal edges from the horizontal raw gradient.
    Horizontal,
    /// Horizontal stepping over the slash-diagonal raw gradient.
    HorizontalSlash,
    /// Vertical stepping over the slash-diagonal raw gradient.
    VerticalSlash,
}

impl AccelClass {
    pub const ALL: [AccelClass; 6] = [
        AccelClass::Vertical,
        AccelClass::VerticalBackslash,
        AccelClass::HorizontalBackslash,
        AccelClass::Horizontal,
        AccelClass::HorizontalSlash,
        AccelClass::VerticalSlash,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stepping direction the class's accelerator must be built with.
    pub fn orientation(self) -> EdgeOrientation {
        match self {
            AccelClass::Vertical | AccelClass::VerticalBackslash | AccelClass::VerticalSlash => {
                EdgeOrientation::Vertical
            }
            AccelClass::HorizontalBackslash
            | AccelClass::Horizontal
            | AccelClass::HorizontalSlash => EdgeOrientation::Horizontal,
        }
    }

    /// Angle buckets this class votes into.
    pub fn band(self) -> AngleBand {
        match self {
            AccelClass::Vertical => AngleBand::new(112, 32),
            AccelClass::VerticalBackslash => AngleBand::new(16, 16),
            AccelClass::HorizontalBackslash => AngleBand::new(32, 16),
            AccelClass::Horizontal => AngleBand::new(48, 32),
            AccelClass::HorizontalSlash => AngleBand::new(80, 16),
            AccelClass::VerticalSlash => AngleBand::new(96, 16),
        }
    }
}

/// Contiguous run of angle buckets, possibly wrapping past 127.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AngleBand {
    pub start: usize,
    pub len: usize,
}

impl AngleBand {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Bucket indices in band order, starting at `start`.
    pub fn angles(self) -> impl Iterator<Item = usize> {
        (0..self.len).map(move |i| (self.start + i) % ANGLE_BUCKETS)
    }

    pub fn contains(self, angle: usize) -> bool {
        (angle + ANGLE_BUCKETS - self.start) % ANGLE_BUCKETS < self.len
    }
}

/// The six accelerators of one frame plus the frame size used for clipping.
#[derive(Clone, Debug)]
pub struct GradientFrame<'a> {
    pub width: usize,
    pub height: usize,
    accels: [&'a AccelGrid<'a>; 6],
}

impl<'a> GradientFrame<'a> {
    /// `accels` is ordered as [`AccelClass::ALL`].
    pub fn new(
        width: usize,
        height: usize,
        accels: [&'a AccelGrid<'a>; 6],
    ) -> Result<Self, HoughError> {
        for (class, accel) in AccelClass::ALL.iter().zip(accels.iter()) {
            if accel.orientation != class.orientation() {
                return Err(HoughError::OrientationMismatch {
                    class: *class,
                    expected: class.orientation(),
                    actual: accel.orientation,
                });
            }
        }
        Ok(Self {
            width,
            height,
            accels,
        })
    }

    #[inline]
    pub fn accel(&self, class: AccelClass) -> &'a AccelGrid<'a> {
        self.accels[class.index()]
    }
}
