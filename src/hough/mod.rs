//! Local Hough accumulation for one 64×64 image window.
//!
//! A region runs three stages strictly in order, each consuming the
//! previous stage's finished accumulator:
//!
//! 1. [`line`] – every zero crossing on every accelerator votes its magnitude
//!    into all angle buckets of its class's band.
//! 2. [`maxima`] – every crossing is attributed to the strongest line through
//!    it and re-weighted by the raw gradient at the pixel.
//! 3. [`vanish`] – every populated maxima bucket is swept across nearby angles
//!    to record where near-parallel lines would converge.
//!
//! All geometry lives in bucket space (see [`crate::angle`]); contributions
//! that land outside it are dropped.

pub mod line;
pub mod local;
pub mod maxima;
pub mod vanish;

pub use line::{accumulate_edge, accumulate_lines};
pub use local::{local_offset, offset_bucket, uncompact_offset, HoughBucket, HoughLocal};
pub use maxima::{maxima_weight, refine_maxima, strongest_line, suppress_non_maxima};
pub use vanish::{accumulate_vanish, vanish_bucket, PARALLEL_BUCKET};

use crate::angle::WINDOW;
use serde::{Deserialize, Serialize};

/// Pipeline stage that produced an accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Line = 0,
    Maxima = 1,
    Vanish = 2,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Line, Stage::Maxima, Stage::Vanish];

    /// Numeric tag reported to diagnostic consumers.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Line => "line",
            Stage::Maxima => "maxima",
            Stage::Vanish => "vanish",
        }
    }
}

/// Image pixels covered by the window at `(x_origin, y_origin)`, clipped to
/// `width × height`, in row-major order.
pub(crate) fn window_pixels(
    x_origin: usize,
    y_origin: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let rows = y_origin..(y_origin + WINDOW).min(height.max(y_origin));
    let cols = x_origin..(x_origin + WINDOW).min(width.max(x_origin));
    rows.flat_map(move |row| cols.clone().map(move |col| (col, row)))
}
