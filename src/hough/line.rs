//! Stage 1: raw line votes from every zero crossing in the window.
use super::local::{offset_bucket, HoughLocal};
use super::window_pixels;
use crate::edges::{detect_zero_crossing, AccelClass, AngleBand, GradientFrame, ZeroCrossing};

/// Rebuilds `line` from the crossings found inside its window.
///
/// `on_edge` sees every crossing before it is voted; it has no influence on
/// the accumulator.
pub fn accumulate_lines<F>(line: &mut HoughLocal, frame: &GradientFrame<'_>, mut on_edge: F)
where
    F: FnMut(AccelClass, &ZeroCrossing),
{
    line.reset(line.x_origin, line.y_origin);
    for (col, row) in window_pixels(line.x_origin, line.y_origin, frame.width, frame.height) {
        for class in AccelClass::ALL {
            if let Some(edge) = detect_zero_crossing(frame.accel(class), col, row) {
                on_edge(class, &edge);
                accumulate_edge(line, class.band(), &edge);
            }
        }
    }
}

/// Votes `edge.mag` into every angle of `band` at the offset the edge
/// projects to. Offsets outside the window are skipped.
pub fn accumulate_edge(line: &mut HoughLocal, band: AngleBand, edge: &ZeroCrossing) {
    let (x, y) = line.to_local(edge.x, edge.y);
    for angle in band.angles() {
        if let Some(offset) = offset_bucket(x, y, angle) {
            line.add(offset, angle, edge.mag);
        }
    }
}
