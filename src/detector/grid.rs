//! Region tiling and the accumulator arena.
//!
//! Each region owns three accumulators (line, maxima, vanish). They live in
//! three flat arenas indexed by region id rather than inside the region, so
//! regions stay small and a failed allocation unwinds by simply dropping
//! whatever arenas were already built.
use super::params::RegionLayout;
use crate::error::HoughError;
use crate::hough::{HoughLocal, Stage};
use serde::Serialize;

/// One processing window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Row-major index, also the arena index.
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub x_origin: usize,
    pub y_origin: usize,
}

/// Accumulators for every region of one pass.
#[derive(Debug)]
pub struct HoughGrid {
    rows: usize,
    cols: usize,
    regions: Vec<Region>,
    line: Vec<HoughLocal>,
    maxima: Vec<HoughLocal>,
    vanish: Vec<HoughLocal>,
}

/// Byte allowance shared by all accumulators of a pass.
struct MemoryBudget {
    remaining: Option<usize>,
}

impl MemoryBudget {
    fn take(&mut self, bytes: usize) -> bool {
        match self.remaining.as_mut() {
            None => true,
            Some(left) if *left >= bytes => {
                *left -= bytes;
                true
            }
            Some(_) => false,
        }
    }
}

impl HoughGrid {
    /// Allocates zero-filled accumulators for every region of `layout`.
    ///
    /// Line accumulators are reserved for all regions first, then maxima,
    /// then vanish. On failure nothing survives.
    pub fn allocate(
        layout: &RegionLayout,
        width: usize,
        height: usize,
        memory_limit_bytes: Option<usize>,
    ) -> Result<Self, HoughError> {
        let (rows, cols) = layout.shape(width, height);
        let regions = layout.regions(width, height);
        let mut budget = MemoryBudget {
            remaining: memory_limit_bytes,
        };
        let line = allocate_arena(Stage::Line, &regions, &mut budget)?;
        let maxima = allocate_arena(Stage::Maxima, &regions, &mut budget)?;
        let vanish = allocate_arena(Stage::Vanish, &regions, &mut budget)?;
        Ok(Self {
            rows,
            cols,
            regions,
            line,
            maxima,
            vanish,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: usize) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Region at tiling position `(row, col)`.
    pub fn region_at(&self, row: usize, col: usize) -> Option<&Region> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.regions.get(row * self.cols + col)
    }

    pub fn accumulator(&self, id: usize, stage: Stage) -> Option<&HoughLocal> {
        match stage {
            Stage::Line => self.line.get(id),
            Stage::Maxima => self.maxima.get(id),
            Stage::Vanish => self.vanish.get(id),
        }
    }

    pub fn line(&self, id: usize) -> Option<&HoughLocal> {
        self.line.get(id)
    }

    pub fn maxima(&self, id: usize) -> Option<&HoughLocal> {
        self.maxima.get(id)
    }

    pub fn vanish(&self, id: usize) -> Option<&HoughLocal> {
        self.vanish.get(id)
    }

    pub(crate) fn arenas_mut(
        &mut self,
    ) -> (
        &[Region],
        &mut [HoughLocal],
        &mut [HoughLocal],
        &mut [HoughLocal],
    ) {
        (
            &self.regions,
            &mut self.line,
            &mut self.maxima,
            &mut self.vanish,
        )
    }

    /// Heap bytes held by the accumulators.
    pub fn accumulator_bytes(&self) -> usize {
        (self.line.len() + self.maxima.len() + self.vanish.len()) * HoughLocal::BYTES
    }
}

fn allocate_arena(
    stage: Stage,
    regions: &[Region],
    budget: &mut MemoryBudget,
) -> Result<Vec<HoughLocal>, HoughError> {
    let mut arena = Vec::new();
    arena
        .try_reserve_exact(regions.len())
        .map_err(|_| HoughError::Allocation {
            stage,
            region: 0,
            requested_bytes: regions.len() * std::mem::size_of::<HoughLocal>(),
        })?;
    for region in regions {
        let failed = HoughError::Allocation {
            stage,
            region: region.id,
            requested_bytes: HoughLocal::BYTES,
        };
        if !budget.take(HoughLocal::BYTES) {
            return Err(failed);
        }
        let local = HoughLocal::try_new(region.x_origin, region.y_origin).map_err(|_| failed)?;
        arena.push(local);
    }
    Ok(arena)
}
