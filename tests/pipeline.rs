mod common;

use common::synthetic_gradients::{frame, SyntheticGradients};
use common::{Event, Recorder};
use dmtx_hough::angle::{ANGLE_BUCKETS, OFFSET_BUCKETS};
use dmtx_hough::diagnostics::AccumulatorDump;
use dmtx_hough::hough::{maxima_weight, vanish_bucket, PARALLEL_BUCKET};
use dmtx_hough::{
    AccelClass, HoughDetector, HoughError, HoughLocal, HoughParams, RegionLayout, Stage,
};
use dmtx_hough::image::EdgeOrientation;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn snapshot(detector: &HoughDetector) -> Vec<HoughLocal> {
    let grid = detector.grid().expect("populated grid");
    grid.regions()
        .iter()
        .flat_map(|r| Stage::ALL.map(|s| grid.accumulator(r.id, s).unwrap().clone()))
        .collect()
}

#[test]
fn flat_frame_produces_empty_accumulators() {
    init_logger();
    let synth = SyntheticGradients::flat(128, 96, 25);
    let grids = synth.accel_grids();
    let frame = frame(128, 96, &grids);

    let mut detector = HoughDetector::new(HoughParams::default());
    let mut recorder = Recorder::default();
    let grid = detector.populate(&frame, &mut recorder).unwrap();

    assert_eq!((grid.rows(), grid.cols()), (2, 2));
    for region in grid.regions() {
        for stage in Stage::ALL {
            assert!(grid.accumulator(region.id, stage).unwrap().is_empty());
        }
    }
    let expected: Vec<_> = (0..4)
        .flat_map(|id| Stage::ALL.map(|s| (id, s)))
        .collect();
    assert_eq!(recorder.stages(), expected);
}

#[test]
fn single_sign_change_votes_only_in_vertical_band() {
    init_logger();
    let mut synth = SyntheticGradients::flat(64, 64, 40);
    {
        let accel = synth.accel_mut(AccelClass::Vertical);
        accel.set(20, 30, -10);
        accel.set(21, 30, 10);
    }
    let grids = synth.accel_grids();
    let frame = frame(64, 64, &grids);

    let params = HoughParams {
        display_edge: Some(AccelClass::Vertical),
        ..Default::default()
    };
    let mut detector = HoughDetector::new(params);
    let mut recorder = Recorder::default();
    let grid = detector.populate(&frame, &mut recorder).unwrap();

    let crossings = recorder.crossings();
    assert_eq!(crossings.len(), 1);
    let edge = crossings[0];
    assert_eq!(edge.fraction, 0.5);
    assert_eq!((edge.x, edge.y), (22.5, 31.5));
    assert_eq!(edge.mag, 40);

    let band = AccelClass::Vertical.band();
    let line = grid.line(0).unwrap();
    assert!(!line.is_empty());
    for bucket in line.populated() {
        assert!(band.contains(bucket.angle), "vote at angle {}", bucket.angle);
        assert_eq!(bucket.value, 40);
    }
    assert_eq!(line.get(22, 0), Some(40));

    // one isolated bucket: sharpened to six times the raw strength
    let maxima = grid.maxima(0).unwrap();
    assert_eq!(maxima.populated().count(), 1);
    assert_eq!(maxima.total(), 6 * 40);
    let best = maxima.peak().unwrap();
    assert!(band.contains(best.angle));

    let vanish = grid.vanish(0).unwrap();
    assert_eq!(vanish.get(PARALLEL_BUCKET, best.angle), Some(6 * 40));
}

#[test]
fn collinear_edges_peak_at_axis_angles() {
    init_logger();
    // (class, step, expected offset, expected angle)
    let cases = [
        (AccelClass::Vertical, 20usize, 22usize, 0usize),
        (AccelClass::Horizontal, 40, 42, 64),
    ];
    for (class, step, offset, angle) in cases {
        let mut synth = SyntheticGradients::flat(64, 64, 40);
        match class {
            AccelClass::Vertical => synth.vertical_step(class, step),
            _ => synth.horizontal_step(class, step),
        }
        let grids = synth.accel_grids();
        let frame = frame(64, 64, &grids);

        let mut detector = HoughDetector::new(HoughParams::default());
        let grid = detector.populate(&frame, &mut ()).unwrap();

        let line = grid.line(0).unwrap();
        let peak = line.peak().unwrap();
        assert_eq!((peak.offset, peak.angle, peak.value), (offset, angle, 63 * 40));

        let maxima = grid.maxima(0).unwrap();
        assert_eq!(maxima.populated().count(), 1, "{class:?}");
        assert_eq!(maxima.get(offset, angle), Some(6 * 63 * 40));

        let vanish = grid.vanish(0).unwrap();
        assert_eq!(vanish.get(PARALLEL_BUCKET, angle), Some(6 * 63 * 40));
        for bucket in vanish.populated() {
            let delta = (bucket.angle as i32 - angle as i32).rem_euclid(ANGLE_BUCKETS as i32);
            assert!(delta <= 20 || delta >= ANGLE_BUCKETS as i32 - 20);
        }
    }
    // Perpendicular peaks never share a vanishing point.
    for offset in 0..OFFSET_BUCKETS {
        assert_eq!(vanish_bucket(64, 0, offset), None);
        assert_eq!(vanish_bucket(0, 64, offset), None);
    }
}

#[test]
fn raw_evidence_when_suppression_is_off() {
    let mut synth = SyntheticGradients::flat(64, 64, 40);
    synth.vertical_step(AccelClass::Vertical, 20);
    let grids = synth.accel_grids();
    let frame = frame(64, 64, &grids);

    let params = HoughParams {
        suppress_non_maxima: false,
        ..Default::default()
    };
    let mut detector = HoughDetector::new(params);
    let grid = detector.populate(&frame, &mut ()).unwrap();
    let maxima = grid.maxima(0).unwrap();
    assert_eq!(maxima.populated().count(), 1);
    assert_eq!(maxima.get(22, 0), Some(63 * 40));
}

#[test]
fn default_maxima_keep_only_local_peaks() {
    init_logger();
    let synth = SyntheticGradients::noisy(64, 64, 7);
    let grids = synth.accel_grids();
    let frame = frame(64, 64, &grids);

    let mut detector = HoughDetector::new(HoughParams::default());
    let suppressed = detector.populate(&frame, &mut ()).unwrap().maxima(0).unwrap().clone();
    let mut detector = HoughDetector::new(HoughParams {
        suppress_non_maxima: false,
        ..Default::default()
    });
    let raw = detector.populate(&frame, &mut ()).unwrap().maxima(0).unwrap().clone();

    let dominated = |offset: usize, angle: usize| {
        let v = raw.get(offset, angle).unwrap();
        let below = offset.checked_sub(1).and_then(|o| raw.get(o, angle));
        let above = raw.get(offset + 1, angle);
        below.is_some_and(|n| n > v) || above.is_some_and(|n| n > v)
    };
    assert!(raw.populated().any(|b| dominated(b.offset, b.angle)));

    assert!(!suppressed.is_empty());
    for bucket in suppressed.populated() {
        assert!(
            !dominated(bucket.offset, bucket.angle),
            "bucket ({}, {}) is not a local maximum",
            bucket.offset,
            bucket.angle
        );
    }
    for bucket in raw.populated() {
        assert_eq!(
            suppressed.get(bucket.offset, bucket.angle),
            Some(maxima_weight(&raw, bucket.angle, bucket.offset))
        );
    }
}

#[test]
fn diagonal_classes_refine_inside_their_own_band() {
    init_logger();
    // (class, raw level of the class's own plane)
    let cases = [
        (AccelClass::VerticalBackslash, 7u32),
        (AccelClass::HorizontalBackslash, 11),
        (AccelClass::HorizontalSlash, 9),
        (AccelClass::VerticalSlash, 13),
    ];
    for (class, level) in cases {
        let mut synth = SyntheticGradients::flat(64, 64, 40);
        synth.set_raw_level(class, level as i32);
        if class.orientation() == EdgeOrientation::Vertical {
            synth.vertical_step(class, 20);
        } else {
            synth.horizontal_step(class, 40);
        }
        let grids = synth.accel_grids();
        let frame = frame(64, 64, &grids);
        let band = class.band();

        for suppress in [false, true] {
            let mut detector = HoughDetector::new(HoughParams {
                suppress_non_maxima: suppress,
                ..Default::default()
            });
            let grid = detector.populate(&frame, &mut ()).unwrap();

            for bucket in grid.line(0).unwrap().populated() {
                assert!(band.contains(bucket.angle), "{class:?} line vote at {}", bucket.angle);
            }
            let maxima = grid.maxima(0).unwrap();
            for bucket in maxima.populated() {
                assert!(
                    band.contains(bucket.angle),
                    "{class:?} maxima at angle {}",
                    bucket.angle
                );
            }
            if !suppress {
                // 63 crossings, each credited with the class's own raw strength
                assert_eq!(maxima.total(), 63 * level as u64, "{class:?}");
                assert!(maxima.populated().all(|b| b.value % level == 0));
            }
        }
    }
}

#[test]
fn repeated_passes_are_identical() {
    init_logger();
    let synth = SyntheticGradients::noisy(150, 100, 7);
    let grids = synth.accel_grids();
    let frame = frame(150, 100, &grids);

    let mut detector = HoughDetector::new(HoughParams::default());
    detector.populate(&frame, &mut ()).unwrap();
    let first = snapshot(&detector);
    detector.populate(&frame, &mut ()).unwrap();
    let second = snapshot(&detector);

    assert_eq!(first.len(), 6 * 3);
    assert!(first.iter().any(|acc| !acc.is_empty()));
    assert_eq!(first, second);
}

#[test]
fn parallel_pass_matches_sequential() {
    init_logger();
    let synth = SyntheticGradients::noisy(200, 130, 99);
    let grids = synth.accel_grids();
    let frame = frame(200, 130, &grids);

    let base = HoughParams {
        display_edge: Some(AccelClass::HorizontalBackslash),
        suppress_non_maxima: true,
        ..Default::default()
    };
    let mut sequential = HoughDetector::new(base.clone());
    let mut seq_events = Recorder::default();
    sequential.populate(&frame, &mut seq_events).unwrap();

    let mut parallel = HoughDetector::new(HoughParams {
        parallel: true,
        ..base
    });
    let mut par_events = Recorder::default();
    parallel.populate(&frame, &mut par_events).unwrap();

    assert_eq!(snapshot(&sequential), snapshot(&parallel));
    assert!(!seq_events.crossings().is_empty());
    assert_eq!(seq_events.events, par_events.events);
}

#[test]
fn display_filter_only_observes() {
    let mut synth = SyntheticGradients::flat(64, 64, 40);
    synth.vertical_step(AccelClass::Vertical, 20);
    let grids = synth.accel_grids();
    let frame = frame(64, 64, &grids);

    let mut outputs = Vec::new();
    for (display, expected) in [
        (None, 0usize),
        (Some(AccelClass::Horizontal), 0),
        (Some(AccelClass::Vertical), 63),
    ] {
        let mut detector = HoughDetector::new(HoughParams {
            display_edge: display,
            ..Default::default()
        });
        let mut recorder = Recorder::default();
        detector.populate(&frame, &mut recorder).unwrap();
        assert_eq!(recorder.crossings().len(), expected, "{display:?}");
        assert!(recorder.events.iter().all(|e| match e {
            Event::Crossing { class, .. } => Some(*class) == display,
            Event::Accumulator { .. } => true,
        }));
        outputs.push(snapshot(&detector));
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[test]
fn single_window_layout_uses_local_coordinates() {
    let mut synth = SyntheticGradients::flat(160, 64, 40);
    synth.vertical_step(AccelClass::Vertical, 84);
    let grids = synth.accel_grids();
    let frame = frame(160, 64, &grids);

    let mut detector = HoughDetector::new(HoughParams {
        layout: RegionLayout::Single {
            x_origin: 64,
            y_origin: 0,
        },
        ..Default::default()
    });
    let grid = detector.populate(&frame, &mut ()).unwrap();
    assert_eq!(grid.len(), 1);
    let line = grid.line(0).unwrap();
    assert_eq!((line.x_origin, line.y_origin), (64, 0));
    let peak = line.peak().unwrap();
    assert_eq!((peak.offset, peak.angle), (22, 0));
}

#[test]
fn allocation_failure_leaves_no_grid() {
    init_logger();
    let synth = SyntheticGradients::flat(64, 64, 1);
    let grids = synth.accel_grids();
    let frame = frame(64, 64, &grids);

    let mut detector = HoughDetector::new(HoughParams::default());
    assert!(!detector.destroy());
    detector.populate(&frame, &mut ()).unwrap();
    assert!(detector.grid().is_some());

    // Room for the line accumulator only.
    detector.set_params(HoughParams {
        memory_limit_bytes: Some(HoughLocal::BYTES),
        ..Default::default()
    });
    let mut recorder = Recorder::default();
    let err = detector.populate(&frame, &mut recorder).unwrap_err();
    assert_eq!(
        err,
        HoughError::Allocation {
            stage: Stage::Maxima,
            region: 0,
            requested_bytes: HoughLocal::BYTES,
        }
    );
    assert!(detector.grid().is_none());
    assert!(recorder.events.is_empty(), "no stage may run on a partial grid");
    assert!(!detector.destroy());

    detector.set_params(HoughParams::default());
    detector.populate(&frame, &mut ()).unwrap();
    assert!(detector.destroy());
    assert!(detector.grid().is_none());
}

#[test]
fn diagnostics_report_and_dump() {
    init_logger();
    let mut synth = SyntheticGradients::flat(100, 64, 40);
    synth.vertical_step(AccelClass::Vertical, 20);
    let grids = synth.accel_grids();
    let frame = frame(100, 64, &grids);

    let dir = std::env::temp_dir().join("dmtx_hough_dump_test");
    let _ = std::fs::remove_dir_all(&dir);
    let mut dump = AccumulatorDump::new(&dir);
    let mut detector = HoughDetector::new(HoughParams::default());
    let report = detector
        .populate_with_diagnostics(&frame, &mut dump)
        .unwrap();

    assert_eq!((report.input.rows, report.input.cols), (1, 2));
    assert_eq!(report.regions.len(), 2);
    let first = &report.regions[0];
    assert_eq!(first.line.peak.map(|p| (p.offset, p.angle)), Some((22, 0)));
    assert_eq!(first.maxima.total, 6 * 63 * 40);
    assert!(report.regions[1].line.peak.is_none());
    assert!(report.timings.get("allocate").is_some());
    assert!(report.timings.get("regions").is_some());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"regions\""));
    assert!(json.contains("\"totalMs\""));
    let report_path = dir.join("report.json");
    report.write_json(&report_path).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written["input"]["cols"], 2);

    assert!(dump.failures().is_empty(), "{:?}", dump.failures());
    assert_eq!(dump.written().len(), 6);
    assert!(dir.join("region001_vanish.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}
