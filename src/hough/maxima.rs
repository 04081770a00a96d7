//! Stage 2: strongest-line attribution and peak sharpening.
//!
//! Every crossing found again in the window is credited to the single
//! strongest line through it within its class's band, weighted by the raw
//! gradient at the pixel. This turns vote counts into edge-strength evidence
//! and starves lines that only collected weak, scattered votes.
use super::local::{offset_bucket, HoughBucket, HoughLocal, BUCKET_COUNT};
use super::window_pixels;
use crate::angle::{angle_neighbours, ANGLE_BUCKETS, OFFSET_BUCKETS};
use crate::edges::{detect_zero_crossing, AccelClass, AngleBand, GradientFrame};

/// Rebuilds `maxima` from `line`, which must be the finished line
/// accumulator of the same window.
pub fn refine_maxima(maxima: &mut HoughLocal, line: &HoughLocal, frame: &GradientFrame<'_>) {
    maxima.reset(line.x_origin, line.y_origin);
    for (col, row) in window_pixels(line.x_origin, line.y_origin, frame.width, frame.height) {
        for class in AccelClass::ALL {
            let accel = frame.accel(class);
            let Some(edge) = detect_zero_crossing(accel, col, row) else {
                continue;
            };
            let Some(best) = strongest_line(line, edge.x, edge.y, class.band()) else {
                continue;
            };
            let strength = accel
                .sobel_strength(col as isize - 1, row as isize - 1)
                .unwrap_or(0);
            if strength > 0 {
                maxima.add(best.offset, best.angle, strength);
            }
        }
    }
}

/// Largest positive bucket of `line` among the lines of `band` passing
/// through image point `(x, y)`. Earlier angles in band order win ties.
///
/// The exact sub-pixel point is projected (not rounded to a pixel centre), so
/// the buckets compared are the ones the crossing itself voted into.
pub fn strongest_line(line: &HoughLocal, x: f64, y: f64, band: AngleBand) -> Option<HoughBucket> {
    let (x, y) = line.to_local(x, y);
    let mut best: Option<HoughBucket> = None;
    for angle in band.angles() {
        let Some(offset) = offset_bucket(x, y, angle) else {
            continue;
        };
        let value = line.get(offset, angle).unwrap_or(0);
        if value > best.map_or(0, |b| b.value) {
            best = Some(HoughBucket {
                offset,
                angle,
                value,
            });
        }
    }
    best
}

/// Sharpened peak weight of bucket `(offset, angle)`.
///
/// Zero when either offset neighbour at the same angle is strictly larger.
/// Otherwise `6·v − 2·(up + down) − (upup + downdown) − (left + right)`,
/// where `left`/`right` sum the three offset neighbours at the adjacent
/// angles (wrapping at 0/127), clamped at zero. Cells beyond the offset axis
/// count as zero.
pub fn maxima_weight(acc: &HoughLocal, angle: usize, offset: usize) -> u32 {
    let at = |d: isize, a: usize| -> i64 {
        usize::try_from(d)
            .ok()
            .and_then(|d| acc.get(d, a))
            .map_or(0, i64::from)
    };
    let d = offset as isize;
    let val = at(d, angle);
    let down = at(d - 1, angle);
    let up = at(d + 1, angle);
    if down > val || up > val {
        return 0;
    }

    // TODO: mirror the offset when the neighbour angle wraps across 0/127
    let (left, right) = angle_neighbours(angle);
    let side = |a: usize| at(d - 1, a) + at(d, a) + at(d + 1, a);

    let weight = 6 * val
        - 2 * (up + down)
        - (at(d + 2, angle) + at(d - 2, angle))
        - (side(left) + side(right));
    weight.clamp(0, u32::MAX as i64) as u32
}

/// Replaces every bucket of `acc` by its [`maxima_weight`].
pub fn suppress_non_maxima(acc: &mut HoughLocal) {
    let mut weights = Vec::with_capacity(BUCKET_COUNT);
    for offset in 0..OFFSET_BUCKETS {
        for angle in 0..ANGLE_BUCKETS {
            weights.push(maxima_weight(acc, angle, offset));
        }
    }
    for (i, w) in weights.into_iter().enumerate() {
        acc.set(i / ANGLE_BUCKETS, i % ANGLE_BUCKETS, w);
    }
}
