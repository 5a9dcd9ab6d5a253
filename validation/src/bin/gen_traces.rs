//! Generate random-policy trace fixtures.
//!
//! Usage: gen_traces <out_dir> [runs] [frames_per_run] [seed]
//!
//! Each run resets a fresh machine to game selection 0 on amateur
//! difficulty, then drives it with uniformly random actions, snapshotting
//! RAM after every frame. Chunks of 1000 steps land in <out_dir> as
//! gzip-compressed JSON.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use burrow_core::prelude::*;
use burrow_validation::{ChunkWriter, TraceStep};

const CHUNK_SIZE: usize = 1000;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(out_dir) = args.get(1).map(PathBuf::from) else {
        eprintln!("usage: gen_traces <out_dir> [runs] [frames_per_run] [seed]");
        return ExitCode::FAILURE;
    };
    let runs: u32 = args.get(2).map_or(1, |v| v.parse().unwrap_or(1));
    let frames: u32 = args.get(3).map_or(10_000, |v| v.parse().unwrap_or(10_000));
    let seed: u64 = args.get(4).map_or(0, |v| v.parse().unwrap_or(0));

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("cannot create {}: {e}", out_dir.display());
        return ExitCode::FAILURE;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut writer = ChunkWriter::new(&out_dir, "trace", CHUNK_SIZE);

    for run in 0..runs {
        let mut game = Gopher::new();
        game.reset(0, 0);

        for _ in 0..frames {
            let action = Action::ALL[rng.gen_range(0..Action::ALL.len())];
            game.tick(action);

            let step = TraceStep {
                action: action as u8,
                ram: game.mem.as_bytes().to_vec(),
            };
            if let Err(e) = writer.push(step) {
                eprintln!("run {run}: {e}");
                return ExitCode::FAILURE;
            }
        }

        if let Err(e) = writer.end_run() {
            eprintln!("run {run}: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = writer.finish() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
