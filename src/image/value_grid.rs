//! Signed integer grids: raw directional gradients and their accelerators.
use crate::error::HoughError;
use serde::{Deserialize, Serialize};

/// Owned signed grid in row-major layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueGrid {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    data: Vec<i32>,
}

impl ValueGrid {
    /// Zero-filled grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<i32>) -> Result<Self, HoughError> {
        if data.len() != w * h {
            return Err(HoughError::SizeMismatch {
                expected: w * h,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> i32 {
        self.data[row * self.w + col]
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, v: i32) {
        self.data[row * self.w + col] = v;
    }

    /// Value at signed coordinates, `None` outside the grid.
    #[inline]
    pub fn value_at(&self, col: isize, row: isize) -> Option<i32> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.w || row >= self.h {
            return None;
        }
        Some(self.get(col, row))
    }

    /// Same grid with every value negated.
    pub fn negated(&self) -> Self {
        Self {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|v| v.wrapping_neg()).collect(),
        }
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

impl crate::image::traits::ImageView for ValueGrid {
    type Pixel = i32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[i32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

/// Direction in which an accelerator compares neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrientation {
    /// Column-adjacent cells (edges crossing a row).
    Vertical,
    /// Row-adjacent cells (edges crossing a column).
    Horizontal,
}

impl EdgeOrientation {
    /// Cell step `(dcol, drow)` between the two samples a crossing straddles.
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self {
            EdgeOrientation::Vertical => (1, 0),
            EdgeOrientation::Horizontal => (0, 1),
        }
    }
}

/// Accelerator grid together with the raw gradient grid it was derived from.
#[derive(Clone, Debug)]
pub struct AccelGrid<'a> {
    pub values: ValueGrid,
    pub orientation: EdgeOrientation,
    pub sobel: &'a ValueGrid,
}

impl<'a> AccelGrid<'a> {
    pub fn new(values: ValueGrid, orientation: EdgeOrientation, sobel: &'a ValueGrid) -> Self {
        Self {
            values,
            orientation,
            sobel,
        }
    }

    /// Absolute raw gradient at `(col, row)`; `None` when outside the raw grid.
    #[inline]
    pub fn sobel_strength(&self, col: isize, row: isize) -> Option<u32> {
        self.sobel.value_at(col, row).map(i32::unsigned_abs)
    }
}
