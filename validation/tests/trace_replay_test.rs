//! Replay recorded trace fixtures against the core, byte for byte.
//!
//! Fixtures are chunked gzip JSON recordings (see `gen_traces`, or
//! recordings captured from the original cartridge under emulation).
//! The directory is taken from `BURROW_TRACE_DIR`, falling back to
//! `test_data/` next to the crate; without fixtures the test reports
//! itself as skipped and passes.

use std::path::PathBuf;

use burrow_core::game::dirt::render_garden;
use burrow_core::prelude::*;
use burrow_validation::{compare_ram, load_runs};

fn fixture_dir() -> PathBuf {
    std::env::var_os("BURROW_TRACE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data"))
}

#[test]
fn recorded_traces_replay_byte_for_byte() {
    let dir = fixture_dir();
    if !dir.is_dir() {
        eprintln!(
            "no trace fixtures under {}; set BURROW_TRACE_DIR or run gen_traces (skipped)",
            dir.display()
        );
        return;
    }

    let runs = load_runs(&dir).unwrap();
    assert!(!runs.is_empty(), "fixture directory {} is empty", dir.display());

    for run in &runs {
        let mut game = Gopher::new();
        game.reset(0, 0);

        let mut previous: Option<&[u8]> = None;
        for (frame, step) in run.steps.iter().enumerate() {
            let action = Action::from_code(step.action)
                .unwrap_or_else(|| panic!("run {}: bad action code {}", run.run, step.action));
            game.tick(action);

            let mismatches = compare_ram(game.mem.as_bytes(), &step.ram, previous);
            if !mismatches.is_empty() {
                let report = mismatches
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                panic!(
                    "run {} frame {frame} diverged:\n{report}\ngarden:\n{}",
                    run.run,
                    render_garden(&game.mem)
                );
            }
            previous = Some(&step.ram);
        }
    }
}
