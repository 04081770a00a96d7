use super::timing::TimingBreakdown;
use crate::detector::{HoughGrid, Region};
use crate::hough::{HoughBucket, HoughLocal, Stage};
use crate::image::io::write_json_file;
use serde::Serialize;
use std::path::Path;

/// Summary of a populated grid, suitable for JSON dumps.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoughReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub regions: Vec<RegionSummary>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub region: Region,
    pub line: AccumulatorSummary,
    pub maxima: AccumulatorSummary,
    pub vanish: AccumulatorSummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulatorSummary {
    pub total: u64,
    pub populated: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<HoughBucket>,
}

impl AccumulatorSummary {
    pub fn of(local: &HoughLocal) -> Self {
        Self {
            total: local.total(),
            populated: local.populated().count(),
            peak: local.peak(),
        }
    }
}

impl HoughReport {
    pub fn from_grid(
        grid: &HoughGrid,
        width: usize,
        height: usize,
        timings: TimingBreakdown,
    ) -> Self {
        let summary = |id: usize, stage: Stage| {
            grid.accumulator(id, stage)
                .map(AccumulatorSummary::of)
                .unwrap_or(AccumulatorSummary {
                    total: 0,
                    populated: 0,
                    peak: None,
                })
        };
        let regions = grid
            .regions()
            .iter()
            .map(|region| RegionSummary {
                region: *region,
                line: summary(region.id, Stage::Line),
                maxima: summary(region.id, Stage::Maxima),
                vanish: summary(region.id, Stage::Vanish),
            })
            .collect();
        Self {
            input: InputDescriptor {
                width,
                height,
                rows: grid.rows(),
                cols: grid.cols(),
            },
            timings,
            regions,
        }
    }

    /// Pretty-prints the report to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), String> {
        write_json_file(path, self)
    }
}
