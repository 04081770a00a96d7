//! Gradient grids consumed by the detector and small I/O helpers.
//!
//! The accelerator grids are produced upstream (directional Sobel filters
//! followed by an accelerator pass) and are read-only here.

pub mod io;
pub mod traits;
pub mod value_grid;

pub use self::traits::{ImageView, Rows};
pub use self::value_grid::{AccelGrid, EdgeOrientation, ValueGrid};
