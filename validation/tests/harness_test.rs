//! Harness self-tests: chunk file round-trips, the RAM comparison and
//! determinism of the core when replayed from identical inputs.

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use burrow_core::prelude::*;
use burrow_validation::{ChunkWriter, TraceStep, compare_ram, is_ignored_offset, load_runs};

/// Per-test scratch directory, removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "burrow_validation_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        ScratchDir(dir)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn step_with_action(action: u8) -> TraceStep {
    TraceStep {
        action,
        ram: vec![action; RAM_SIZE],
    }
}

#[test]
fn chunk_files_round_trip_across_runs() {
    let scratch = ScratchDir::new("round_trip");

    let mut writer = ChunkWriter::new(&scratch.0, "trace", 3);
    for i in 0..7 {
        writer.push(step_with_action(i)).unwrap();
    }
    writer.end_run().unwrap();
    for i in 7..9 {
        writer.push(step_with_action(i)).unwrap();
    }
    writer.finish().unwrap();

    let runs = load_runs(&scratch.0).unwrap();
    assert_eq!(runs.len(), 2);

    assert_eq!(runs[0].run, 0);
    assert_eq!(runs[0].steps.len(), 7);
    assert_eq!(runs[1].run, 1);
    assert_eq!(runs[1].steps.len(), 2);

    for (i, step) in runs[0].steps.iter().enumerate() {
        assert_eq!(step.action, i as u8);
        assert_eq!(step.ram, vec![i as u8; RAM_SIZE]);
    }
    assert_eq!(runs[1].steps[0].action, 7);
}

#[test]
fn comparison_skips_volatile_bytes_and_reports_the_rest() {
    let actual = [0u8; RAM_SIZE];
    let mut expected = vec![0u8; RAM_SIZE];

    // Divergence on a volatile byte (a graphic pointer) is not reported.
    expected[field::DUCK_GRAPHIC_PTRS] = 0x55;
    assert!(is_ignored_offset(field::DUCK_GRAPHIC_PTRS));
    assert!(compare_ram(&actual, &expected, None).is_empty());

    // Divergence on game state is.
    expected[field::GAME_STATE] = 7;
    let mismatches = compare_ram(&actual, &expected, None);
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].offset, field::GAME_STATE);
    assert_eq!(mismatches[0].actual, 0);
    assert_eq!(mismatches[0].expected, 7);
}

#[test]
fn mismatch_report_names_the_byte_in_three_bases() {
    let actual = [0u8; RAM_SIZE];
    let mut expected = vec![0u8; RAM_SIZE];
    expected[field::GOPHER_VERT_POS] = 0xA5;

    let mut previous = vec![0u8; RAM_SIZE];
    previous[field::GOPHER_VERT_POS] = 3;

    let mismatches = compare_ram(&actual, &expected, Some(&previous));
    let report = mismatches[0].to_string();

    assert!(report.contains(field_name(field::GOPHER_VERT_POS)));
    assert!(report.contains("0xA5"));
    assert!(report.contains("0b10100101"));
    assert!(report.contains("0x03"));
}

#[test]
fn replay_of_identical_inputs_is_byte_identical() {
    let mut rng = StdRng::seed_from_u64(0x60FE);
    let actions: Vec<Action> = (0..500)
        .map(|_| Action::ALL[rng.gen_range(0..Action::ALL.len())])
        .collect();

    let mut recorded = Gopher::new();
    recorded.reset(0, 0);
    let mut snapshots: Vec<[u8; RAM_SIZE]> = Vec::new();
    for &action in &actions {
        recorded.tick(action);
        snapshots.push(*recorded.mem.as_bytes());
    }

    let mut replayed = Gopher::new();
    replayed.reset(0, 0);
    let mut previous: Option<[u8; RAM_SIZE]> = None;
    for (frame, (&action, expected)) in actions.iter().zip(&snapshots).enumerate() {
        replayed.tick(action);
        let mismatches = compare_ram(
            replayed.mem.as_bytes(),
            expected,
            previous.as_ref().map(|p| p.as_slice()),
        );
        assert!(
            mismatches.is_empty(),
            "frame {frame} diverged:\n{}",
            mismatches
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        );
        previous = Some(*expected);
    }
}
