//! Parameters of a Hough pass.
//!
//! Everything here is plain data and (de)serialisable so that tooling can
//! load it from JSON (see [`crate::config`]).
use super::grid::Region;
use crate::angle::WINDOW;
use crate::edges::AccelClass;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// How the image is split into 64×64 windows.
    pub layout: RegionLayout,
    /// Accelerator class whose crossings are reported to the observer.
    /// Purely observational.
    pub display_edge: Option<AccelClass>,
    /// Replace the maxima accumulator by its sharpened peak weights. Turning
    /// this off keeps the raw strength-weighted evidence.
    pub suppress_non_maxima: bool,
    /// Process regions on the rayon pool. Observer callbacks are still
    /// delivered in region order.
    pub parallel: bool,
    /// Upper bound on accumulator memory for one pass.
    pub memory_limit_bytes: Option<usize>,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            layout: RegionLayout::default(),
            display_edge: None,
            suppress_non_maxima: true,
            parallel: false,
            memory_limit_bytes: None,
        }
    }
}

/// Placement of the processing windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RegionLayout {
    /// Cover the whole image with windows at multiples of 64.
    #[default]
    Tiled,
    /// A single window at an explicit origin.
    Single { x_origin: usize, y_origin: usize },
}

impl RegionLayout {
    /// Grid shape `(rows, cols)` for an image of `width × height`.
    pub fn shape(&self, width: usize, height: usize) -> (usize, usize) {
        match self {
            RegionLayout::Tiled => (height.div_ceil(WINDOW), width.div_ceil(WINDOW)),
            RegionLayout::Single { .. } => (1, 1),
        }
    }

    /// Regions in row-major order.
    pub fn regions(&self, width: usize, height: usize) -> Vec<Region> {
        match *self {
            RegionLayout::Tiled => {
                let (rows, cols) = self.shape(width, height);
                (0..rows)
                    .flat_map(|row| (0..cols).map(move |col| (row, col)))
                    .enumerate()
                    .map(|(id, (row, col))| Region {
                        id,
                        row,
                        col,
                        x_origin: col * WINDOW,
                        y_origin: row * WINDOW,
                    })
                    .collect()
            }
            RegionLayout::Single { x_origin, y_origin } => vec![Region {
                id: 0,
                row: 0,
                col: 0,
                x_origin,
                y_origin,
            }],
        }
    }
}
