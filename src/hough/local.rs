//! Per-window `64 × 128` accumulator and the offset projection.
use crate::angle::{bucket_radians, ANGLE_BUCKETS, OFFSET_BUCKETS, WINDOW};
use serde::Serialize;
use std::collections::TryReserveError;

/// Number of buckets in one accumulator.
pub const BUCKET_COUNT: usize = OFFSET_BUCKETS * ANGLE_BUCKETS;

/// A populated accumulator cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HoughBucket {
    pub offset: usize,
    pub angle: usize,
    pub value: u32,
}

/// Hough accumulator for one region, stored offset-major (`[offset][angle]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoughLocal {
    /// Image column of the window's top-left pixel
    pub x_origin: usize,
    /// Image row of the window's top-left pixel
    pub y_origin: usize,
    buckets: Vec<u32>,
}

impl HoughLocal {
    /// Heap footprint of one accumulator.
    pub const BYTES: usize = BUCKET_COUNT * std::mem::size_of::<u32>();

    pub fn new(x_origin: usize, y_origin: usize) -> Self {
        Self {
            x_origin,
            y_origin,
            buckets: vec![0; BUCKET_COUNT],
        }
    }

    /// Zero-filled accumulator, reporting allocator failure instead of aborting.
    pub fn try_new(x_origin: usize, y_origin: usize) -> Result<Self, TryReserveError> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(BUCKET_COUNT)?;
        buckets.resize(BUCKET_COUNT, 0);
        Ok(Self {
            x_origin,
            y_origin,
            buckets,
        })
    }

    #[inline]
    fn idx(offset: usize, angle: usize) -> Option<usize> {
        (offset < OFFSET_BUCKETS && angle < ANGLE_BUCKETS)
            .then_some(offset * ANGLE_BUCKETS + angle)
    }

    /// Bucket value, `None` outside the `64 × 128` bucket space.
    #[inline]
    pub fn get(&self, offset: usize, angle: usize) -> Option<u32> {
        Self::idx(offset, angle).map(|i| self.buckets[i])
    }

    /// Saturating add. Contributions outside the bucket space are dropped.
    #[inline]
    pub(crate) fn add(&mut self, offset: usize, angle: usize, value: u32) {
        if let Some(i) = Self::idx(offset, angle) {
            self.buckets[i] = self.buckets[i].saturating_add(value);
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, offset: usize, angle: usize, value: u32) {
        if let Some(i) = Self::idx(offset, angle) {
            self.buckets[i] = value;
        }
    }

    /// Zero every bucket and move the window.
    pub fn reset(&mut self, x_origin: usize, y_origin: usize) {
        self.x_origin = x_origin;
        self.y_origin = y_origin;
        self.buckets.fill(0);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.buckets
    }

    /// Non-zero buckets in offset-major order.
    pub fn populated(&self) -> impl Iterator<Item = HoughBucket> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0)
            .map(|(i, &value)| HoughBucket {
                offset: i / ANGLE_BUCKETS,
                angle: i % ANGLE_BUCKETS,
                value,
            })
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&v| v as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|&v| v == 0)
    }

    /// Largest bucket; the first one in offset-major order wins ties.
    pub fn peak(&self) -> Option<HoughBucket> {
        self.populated().fold(None, |best: Option<HoughBucket>, b| match best {
            Some(cur) if cur.value >= b.value => Some(cur),
            _ => Some(b),
        })
    }

    /// Window-local coordinates of an image-space point.
    #[inline]
    pub fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.x_origin as f64, y - self.y_origin as f64)
    }
}

impl crate::image::traits::ImageView for HoughLocal {
    type Pixel = u32;

    #[inline]
    fn width(&self) -> usize {
        ANGLE_BUCKETS
    }
    #[inline]
    fn height(&self) -> usize {
        OFFSET_BUCKETS
    }
    #[inline]
    fn row(&self, y: usize) -> &[u32] {
        let start = y * ANGLE_BUCKETS;
        &self.buckets[start..start + ANGLE_BUCKETS]
    }
}

/// Offset of the line through window-local `(x, y)` at `angle`, in bucket units.
///
/// Angles up to 64 project onto `x·cosθ + y·sinθ` scaled by `1/(sinθ + cosθ)`;
/// steeper angles use `x·cosθ + y·sinθ − W·cosθ` scaled by `1/(sinθ − cosθ)`.
/// Either way a point inside the window lands in `[0, 64]`.
#[inline]
pub fn local_offset(x: f64, y: f64, angle: usize) -> f64 {
    let (sin, cos) = bucket_radians(angle).sin_cos();
    let projected = x * cos + y * sin;
    if angle <= ANGLE_BUCKETS / 2 {
        projected / (sin + cos)
    } else {
        (projected - cos * WINDOW as f64) / (sin - cos)
    }
}

/// Offset bucket for window-local `(x, y)` at `angle`, `None` outside `[0, 64)`.
#[inline]
pub fn offset_bucket(x: f64, y: f64, angle: usize) -> Option<usize> {
    let d = local_offset(x, y, angle).floor();
    (d >= 0.0 && d < OFFSET_BUCKETS as f64).then_some(d as usize)
}

/// Inverse of [`local_offset`]: real projected distance `x·cosθ + y·sinθ` of
/// an offset bucket.
#[inline]
pub fn uncompact_offset(offset: usize, angle: usize) -> f64 {
    let (sin, cos) = bucket_radians(angle).sin_cos();
    let d = offset as f64;
    if angle <= ANGLE_BUCKETS / 2 {
        d * (sin + cos)
    } else {
        d * (sin - cos) + cos * WINDOW as f64
    }
}
