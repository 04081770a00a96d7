//! Hough pass orchestration over a grid of image regions.
//!
//! Overview
//! - The image is split into 64×64 regions ([`RegionLayout`]).
//! - All accumulators of the pass are allocated and zero-filled up front
//!   ([`HoughGrid::allocate`]); an allocation failure aborts the pass and
//!   releases whatever was already reserved.
//! - Each region then runs line → maxima → vanish, and the observer sees each
//!   finished accumulator with its [`Stage`](crate::hough::Stage) tag.
//!
//! Regions share nothing but the read-only gradient frame, so with
//! [`HoughParams::parallel`] they run on the rayon pool. Observer calls are
//! buffered and replayed in region order, which keeps the callback sequence
//! identical to the sequential path.
//!
//! Modules
//! - [`params`] – configuration types.
//! - [`grid`] – regions and the accumulator arena.
//! - `pipeline` – the [`HoughDetector`] implementation.

pub mod grid;
pub mod params;
mod pipeline;

pub use grid::{HoughGrid, Region};
pub use params::{HoughParams, RegionLayout};
pub use pipeline::HoughDetector;
