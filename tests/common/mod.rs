#![allow(dead_code)]

pub mod synthetic_gradients;

use dmtx_hough::edges::{AccelClass, ZeroCrossing};
use dmtx_hough::{HoughLocal, HoughObserver, Region, Stage};

/// Everything an observer saw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Crossing {
        region: usize,
        class: AccelClass,
        edge: ZeroCrossing,
    },
    Accumulator {
        region: usize,
        stage: Stage,
        local: HoughLocal,
    },
}

#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn crossings(&self) -> Vec<ZeroCrossing> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Crossing { edge, .. } => Some(*edge),
                _ => None,
            })
            .collect()
    }

    pub fn stages(&self) -> Vec<(usize, Stage)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Accumulator { region, stage, .. } => Some((*region, *stage)),
                _ => None,
            })
            .collect()
    }
}

impl HoughObserver for Recorder {
    fn on_accumulator(&mut self, region: &Region, local: &HoughLocal, stage: Stage) {
        self.events.push(Event::Accumulator {
            region: region.id,
            stage,
            local: local.clone(),
        });
    }

    fn on_zero_crossing(&mut self, region: &Region, class: AccelClass, edge: &ZeroCrossing) {
        self.events.push(Event::Crossing {
            region: region.id,
            class,
            edge: *edge,
        });
    }
}
