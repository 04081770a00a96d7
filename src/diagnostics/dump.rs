//! Observer writing every accumulator to disk as a grayscale PNG.
use super::HoughObserver;
use crate::detector::Region;
use crate::hough::{HoughLocal, Stage};
use crate::image::io::save_heatmap_png;
use std::path::{Path, PathBuf};

/// Writes `region{id:03}_{stage}.png` files into a directory.
///
/// Write failures are collected instead of interrupting the pass.
#[derive(Debug)]
pub struct AccumulatorDump {
    dir: PathBuf,
    written: Vec<PathBuf>,
    failures: Vec<String>,
}

impl AccumulatorDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

impl HoughObserver for AccumulatorDump {
    fn on_accumulator(&mut self, region: &Region, local: &HoughLocal, stage: Stage) {
        let path = self
            .dir
            .join(format!("region{:03}_{}.png", region.id, stage.name()));
        match save_heatmap_png(local, &path) {
            Ok(()) => self.written.push(path),
            Err(err) => {
                log::warn!("AccumulatorDump: {err}");
                self.failures.push(err);
            }
        }
    }
}
