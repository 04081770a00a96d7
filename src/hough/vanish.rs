//! Stage 3: vanishing-point accumulation.
//!
//! A line `(offset, angle)` is re-parameterised at every nearby angle as the
//! direction from the window centre to the point where a line of that angle
//! would meet it. The distance to that point is compressed with an
//! arctangent so that meeting points at infinity collapse onto
//! [`PARALLEL_BUCKET`] and meeting points close to the window spread towards
//! the ends of the offset axis.
use super::local::{uncompact_offset, HoughLocal};
use crate::angle::{bucket_radians, wrapped_delta, ANGLE_BUCKETS, OFFSET_BUCKETS, WINDOW};
use std::f64::consts::{FRAC_PI_2, PI};

/// Bucket representing lines that never meet.
pub const PARALLEL_BUCKET: usize = OFFSET_BUCKETS / 2;

/// Largest angular separation (in buckets) still treated as near-parallel.
const MAX_SEPARATION: i32 = 20;

const HALF_WINDOW: f64 = (WINDOW / 2) as f64;

/// Vanishing bucket at `target` for the line `(source_offset, source_angle)`.
///
/// `None` when the lines are too far from parallel, when the meeting point
/// is degenerate, or when the remapped bucket leaves `[0, 64)`.
pub fn vanish_bucket(target: usize, source_angle: usize, source_offset: usize) -> Option<usize> {
    if target == source_angle {
        return Some(PARALLEL_BUCKET);
    }

    let delta = wrapped_delta(target, source_angle);
    if delta.abs() > MAX_SEPARATION {
        return None;
    }

    let (sin, cos) = bucket_radians(source_angle).sin_cos();
    let d = uncompact_offset(source_offset, source_angle);
    let u = HALF_WINDOW * (cos + sin);
    let delta_rad = delta as f64 * (PI / ANGLE_BUCKETS as f64);
    let x = ((d - u) / delta_rad.sin()).abs();
    if !(x >= 1e-4) {
        return None;
    }

    // [0, π/2] onto [0, 64], rounding half away from zero
    let scale = OFFSET_BUCKETS as f64 / FRAC_PI_2;
    let mut bucket = ((HALF_WINDOW / x).atan() * scale).round() as i64;
    if delta as f64 * (d - u) < 0.0 {
        bucket = -bucket;
    }
    bucket += PARALLEL_BUCKET as i64;

    (0..OFFSET_BUCKETS as i64)
        .contains(&bucket)
        .then_some(bucket as usize)
}

/// Rebuilds `vanish` from the finished maxima accumulator of the same window.
///
/// Each populated bucket is swept over all angles. Where two consecutive
/// angles both resolve, the offsets between them are filled so the locus
/// stays connected; an unresolved angle breaks the run.
pub fn accumulate_vanish(vanish: &mut HoughLocal, maxima: &HoughLocal) {
    vanish.reset(maxima.x_origin, maxima.y_origin);
    for source in maxima.populated() {
        let mut prev: Option<(usize, usize)> = None;
        for angle in 0..ANGLE_BUCKETS {
            let Some(here) = vanish_bucket(angle, source.angle, source.offset) else {
                continue;
            };
            let run = prev
                .filter(|&(prev_angle, _)| angle - prev_angle == 1)
                .map(|(_, d)| d);
            match run {
                Some(d) if d < here => {
                    for offset in d + 1..=here {
                        vanish.add(offset, angle, source.value);
                    }
                }
                Some(d) if d > here => {
                    for offset in here..d {
                        vanish.add(offset, angle, source.value);
                    }
                }
                _ => vanish.add(here, angle, source.value),
            }
            prev = Some((angle, here));
        }
    }
}
