//! Bucket-space geometry shared by the accumulators.
//!
//! Lines are parameterised in normal form. The angle axis holds
//! [`ANGLE_BUCKETS`] buckets spanning a half circle, so bucket `a` stands for
//! `θ = a·π/128`; the other half circle is implied by the sign of the offset.
//! The offset axis holds [`OFFSET_BUCKETS`] buckets scaled so that a
//! [`WINDOW`]-sized region maps onto `[0, 64)`.

use std::f64::consts::PI;

/// Number of angle buckets covering `[0, π)`.
pub const ANGLE_BUCKETS: usize = 128;
/// Number of offset buckets.
pub const OFFSET_BUCKETS: usize = 64;
/// Side length of the square pixel window handled by one region.
pub const WINDOW: usize = 64;

/// Continuous orientation of an angle bucket in radians.
#[inline]
pub fn bucket_radians(angle: usize) -> f64 {
    angle as f64 * (PI / ANGLE_BUCKETS as f64)
}

/// Signed angular separation `target − source` wrapped into `[-64, 64]`.
#[inline]
pub fn wrapped_delta(target: usize, source: usize) -> i32 {
    let half = (ANGLE_BUCKETS / 2) as i32;
    let mut delta = target as i32 - source as i32;
    if delta < -half {
        delta += ANGLE_BUCKETS as i32;
    } else if delta > half {
        delta -= ANGLE_BUCKETS as i32;
    }
    delta
}

/// Angle buckets on either side of `angle`, wrapping at 0/127.
#[inline]
pub fn angle_neighbours(angle: usize) -> (usize, usize) {
    let left = if angle == 0 {
        ANGLE_BUCKETS - 1
    } else {
        angle - 1
    };
    let right = if angle + 1 == ANGLE_BUCKETS {
        0
    } else {
        angle + 1
    };
    (left, right)
}
