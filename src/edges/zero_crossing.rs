//! Sub-pixel zero-crossing detection on a single accelerator grid.
//!
//! For a pixel `(col, row)` the detector compares the two accelerator cells
//! the pixel straddles along the accelerator's stepping direction. The cells
//! are offset from the pixel by a fixed bias (2 cells along the step, 1 cell
//! across it) that undoes the accelerator's own preprocessing shift.
//!
//! - `a·b < 0`: crossing at fraction `t = |a| / |a − b|` between the samples.
//! - `a == 0, b != 0`: crossing exactly on the first sample (`t = 0`) when
//!   the sample before it has the opposite sign of `b`.
//! - anything else: no edge.
//!
//! The edge strength is the absolute raw gradient half way between the two
//! accelerator samples.
use crate::image::{AccelGrid, EdgeOrientation};
use serde::Serialize;

/// Sub-pixel edge location in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZeroCrossing {
    pub x: f64,
    pub y: f64,
    /// Interpolation fraction between the two accelerator samples, `[0, 1)`.
    pub fraction: f64,
    /// Absolute raw gradient at the crossing, always > 0.
    pub mag: u32,
}

#[inline]
fn opposite_signs(a: i32, b: i32) -> bool {
    (a < 0 && b > 0) || (a > 0 && b < 0)
}

/// Looks for a sign change of `accel` at pixel `(col, row)`.
pub fn detect_zero_crossing(accel: &AccelGrid<'_>, col: usize, row: usize) -> Option<ZeroCrossing> {
    let (col, row) = (col as isize, row as isize);
    let (a_col, a_row) = match accel.orientation {
        EdgeOrientation::Vertical => (col - 2, row - 1),
        EdgeOrientation::Horizontal => (col - 1, row - 2),
    };
    let (dc, dr) = accel.orientation.step();

    let here = accel.values.value_at(a_col, a_row)?;
    let next = accel.values.value_at(a_col + dc, a_row + dr)?;

    let fraction = if opposite_signs(here, next) {
        let span = (here as i64 - next as i64).unsigned_abs() as f64;
        here.unsigned_abs() as f64 / span
    } else if here == 0 && next != 0 {
        // Nothing precedes the first cell of a row/column.
        let prev = accel.values.value_at(a_col - dc, a_row - dr)?;
        if !opposite_signs(prev, next) {
            return None;
        }
        0.0
    } else {
        return None;
    };

    crossing_from_cell(accel, a_col, a_row, fraction)
}

fn crossing_from_cell(
    accel: &AccelGrid<'_>,
    a_col: isize,
    a_row: isize,
    fraction: f64,
) -> Option<ZeroCrossing> {
    let (x, y, s_col, s_row) = match accel.orientation {
        EdgeOrientation::Vertical => (
            a_col as f64 + 2.0 + fraction,
            a_row as f64 + 1.5,
            a_col + 1,
            a_row,
        ),
        EdgeOrientation::Horizontal => (
            a_col as f64 + 1.5,
            a_row as f64 + 2.0 + fraction,
            a_col,
            a_row + 1,
        ),
    };
    let mag = accel.sobel_strength(s_col, s_row)?;
    (mag > 0).then_some(ZeroCrossing {
        x,
        y,
        fraction,
        mag,
    })
}
