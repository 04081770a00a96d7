use super::grid::{HoughGrid, Region};
use super::params::HoughParams;
use crate::diagnostics::{HoughObserver, HoughReport, TimingBreakdown};
use crate::edges::{AccelClass, GradientFrame, ZeroCrossing};
use crate::error::HoughError;
use crate::hough::{
    accumulate_lines, accumulate_vanish, refine_maxima, suppress_non_maxima, HoughLocal, Stage,
};
use log::{debug, trace};
use rayon::prelude::*;
use std::time::Instant;

/// Owns the accumulator grid of the most recent pass.
#[derive(Debug)]
pub struct HoughDetector {
    params: HoughParams,
    grid: Option<HoughGrid>,
}

impl HoughDetector {
    pub fn new(params: HoughParams) -> Self {
        Self { params, grid: None }
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    pub fn set_params(&mut self, params: HoughParams) {
        self.params = params;
    }

    /// Grid of the last successful pass.
    pub fn grid(&self) -> Option<&HoughGrid> {
        self.grid.as_ref()
    }

    /// Releases the current grid. Returns `false` if there was none.
    pub fn destroy(&mut self) -> bool {
        self.grid.take().is_some()
    }

    /// Runs a full pass over `frame`.
    ///
    /// Any grid from a previous pass is released first, so on error the
    /// detector holds no grid.
    pub fn populate<O: HoughObserver>(
        &mut self,
        frame: &GradientFrame<'_>,
        observer: &mut O,
    ) -> Result<&HoughGrid, HoughError> {
        let mut timings = TimingBreakdown::default();
        let grid = self.run(frame, observer, &mut timings)?;
        Ok(self.grid.insert(grid))
    }

    /// Like [`populate`](Self::populate) and additionally summarises the grid.
    pub fn populate_with_diagnostics<O: HoughObserver>(
        &mut self,
        frame: &GradientFrame<'_>,
        observer: &mut O,
    ) -> Result<HoughReport, HoughError> {
        let mut timings = TimingBreakdown::default();
        let grid = self.run(frame, observer, &mut timings)?;
        let grid = self.grid.insert(grid);
        Ok(HoughReport::from_grid(grid, frame.width, frame.height, timings))
    }

    fn run<O: HoughObserver>(
        &mut self,
        frame: &GradientFrame<'_>,
        observer: &mut O,
        timings: &mut TimingBreakdown,
    ) -> Result<HoughGrid, HoughError> {
        self.grid = None;
        let t_total = Instant::now();

        let t_alloc = Instant::now();
        let mut grid = HoughGrid::allocate(
            &self.params.layout,
            frame.width,
            frame.height,
            self.params.memory_limit_bytes,
        )
        .map_err(|err| {
            debug!("HoughDetector: {err}");
            err
        })?;
        let alloc_ms = t_alloc.elapsed().as_secs_f64() * 1000.0;
        timings.push("allocate", alloc_ms);
        debug!(
            "HoughDetector: {}x{} regions for {}x{} frame ({} bytes, {:.3} ms)",
            grid.rows(),
            grid.cols(),
            frame.width,
            frame.height,
            grid.accumulator_bytes(),
            alloc_ms
        );

        let t_regions = Instant::now();
        if self.params.parallel {
            self.process_parallel(&mut grid, frame, observer);
        } else {
            self.process_sequential(&mut grid, frame, observer);
        }
        let regions_ms = t_regions.elapsed().as_secs_f64() * 1000.0;
        timings.push("regions", regions_ms);
        timings.total_ms = t_total.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "HoughDetector: processed {} regions in {:.3} ms (parallel={})",
            grid.len(),
            regions_ms,
            self.params.parallel
        );
        Ok(grid)
    }

    fn process_sequential<O: HoughObserver>(
        &self,
        grid: &mut HoughGrid,
        frame: &GradientFrame<'_>,
        observer: &mut O,
    ) {
        let display = self.params.display_edge;
        let (regions, lines, maxima, vanish) = grid.arenas_mut();
        for (((region, line), maxima), vanish) in regions
            .iter()
            .zip(lines.iter_mut())
            .zip(maxima.iter_mut())
            .zip(vanish.iter_mut())
        {
            accumulate_lines(line, frame, |class, edge| {
                if display == Some(class) {
                    observer.on_zero_crossing(region, class, edge);
                }
            });
            observer.on_accumulator(region, line, Stage::Line);

            refine_maxima(maxima, line, frame);
            if self.params.suppress_non_maxima {
                suppress_non_maxima(maxima);
            }
            observer.on_accumulator(region, maxima, Stage::Maxima);

            accumulate_vanish(vanish, maxima);
            observer.on_accumulator(region, vanish, Stage::Vanish);
            trace!("HoughDetector: region {} done", region.id);
        }
    }

    fn process_parallel<O: HoughObserver>(
        &self,
        grid: &mut HoughGrid,
        frame: &GradientFrame<'_>,
        observer: &mut O,
    ) {
        let display = self.params.display_edge;
        let suppress = self.params.suppress_non_maxima;
        let (regions, lines, maxima, vanish) = grid.arenas_mut();
        let crossings: Vec<Vec<(AccelClass, ZeroCrossing)>> = lines
            .par_iter_mut()
            .zip(maxima.par_iter_mut())
            .zip(vanish.par_iter_mut())
            .map(|((line, maxima), vanish)| {
                let mut shown = Vec::new();
                accumulate_lines(line, frame, |class, edge| {
                    if display == Some(class) {
                        shown.push((class, *edge));
                    }
                });
                refine_maxima(maxima, line, frame);
                if suppress {
                    suppress_non_maxima(maxima);
                }
                accumulate_vanish(vanish, maxima);
                shown
            })
            .collect();

        for (region, shown) in regions.iter().zip(crossings) {
            replay(
                observer,
                region,
                &shown,
                [&lines[region.id], &maxima[region.id], &vanish[region.id]],
            );
            trace!("HoughDetector: region {} done", region.id);
        }
    }
}

fn replay<O: HoughObserver>(
    observer: &mut O,
    region: &Region,
    shown: &[(AccelClass, ZeroCrossing)],
    locals: [&HoughLocal; 3],
) {
    for (class, edge) in shown {
        observer.on_zero_crossing(region, *class, edge);
    }
    for (stage, local) in Stage::ALL.into_iter().zip(locals) {
        observer.on_accumulator(region, local, stage);
    }
}
