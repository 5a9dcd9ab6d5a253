//! Trace-fixture tooling: gzip-compressed chunked RAM traces and the
//! byte-for-byte comparison used to validate the core against recordings
//! of the original cartridge.
//!
//! A trace is a sequence of steps, each holding the action code latched
//! for the frame and the full 128-byte RAM snapshot after it. Long runs
//! are split into chunk files named `<prefix>_<run>_<chunk>.json.gz`,
//! replayed in (run, chunk) order with a fresh machine per run.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use burrow_core::mem::{RAM_SIZE, field_name};

// ---- Errors ----

#[derive(Debug)]
pub enum TraceError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A snapshot whose length is not the RAM size.
    SnapshotLength {
        path: PathBuf,
        step: usize,
        len: usize,
    },
    /// A chunk file whose name does not parse as `<prefix>_<run>_<chunk>`.
    ChunkName(PathBuf),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "trace I/O error: {e}"),
            TraceError::Json(e) => write!(f, "trace JSON error: {e}"),
            TraceError::SnapshotLength { path, step, len } => write!(
                f,
                "snapshot length {len} != {RAM_SIZE} at step {step} in {}",
                path.display()
            ),
            TraceError::ChunkName(path) => {
                write!(f, "unparseable chunk file name: {}", path.display())
            }
        }
    }
}

impl std::error::Error for TraceError {}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> Self {
        TraceError::Io(e)
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(e: serde_json::Error) -> Self {
        TraceError::Json(e)
    }
}

// ---- Trace data ----

/// One frame of a recorded run: the acted input and the RAM image after
/// the frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub action: u8,
    pub ram: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceChunk {
    pub steps: Vec<TraceStep>,
}

/// All steps of one run, chunks already concatenated.
#[derive(Debug, Clone)]
pub struct TraceRun {
    pub run: u32,
    pub steps: Vec<TraceStep>,
}

pub fn write_chunk(path: &Path, chunk: &TraceChunk) -> Result<(), TraceError> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    let json = serde_json::to_vec(chunk)?;
    encoder.write_all(&json)?;
    encoder.finish()?;
    Ok(())
}

pub fn read_chunk(path: &Path) -> Result<TraceChunk, TraceError> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;
    let chunk: TraceChunk = serde_json::from_slice(&json)?;

    for (step, trace_step) in chunk.steps.iter().enumerate() {
        if trace_step.ram.len() != RAM_SIZE {
            return Err(TraceError::SnapshotLength {
                path: path.to_path_buf(),
                step,
                len: trace_step.ram.len(),
            });
        }
    }
    Ok(chunk)
}

/// Parse `<prefix>_<run>_<chunk>.json.gz` into (run, chunk).
fn parse_chunk_name(path: &Path) -> Option<(u32, u32)> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".json.gz")?;
    let mut parts = stem.rsplitn(3, '_');
    let chunk: u32 = parts.next()?.parse().ok()?;
    let run: u32 = parts.next()?.parse().ok()?;
    parts.next()?;
    Some((run, chunk))
}

/// Load every chunk under `dir` and stitch them into runs, ordered by
/// run then chunk number.
pub fn load_runs(dir: &Path) -> Result<Vec<TraceRun>, TraceError> {
    let mut files: Vec<(u32, u32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file()
            || !path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".json.gz"))
        {
            continue;
        }
        let (run, chunk) = parse_chunk_name(&path).ok_or_else(|| TraceError::ChunkName(path.clone()))?;
        files.push((run, chunk, path));
    }
    files.sort();

    let mut runs: Vec<TraceRun> = Vec::new();
    for (run, _chunk, path) in files {
        let chunk = read_chunk(&path)?;
        match runs.last_mut() {
            Some(last) if last.run == run => last.steps.extend(chunk.steps),
            _ => runs.push(TraceRun {
                run,
                steps: chunk.steps,
            }),
        }
    }
    Ok(runs)
}

/// Splits a recording into fixed-size chunk files as steps arrive.
pub struct ChunkWriter {
    dir: PathBuf,
    prefix: String,
    chunk_size: usize,
    run: u32,
    chunk: u32,
    pending: TraceChunk,
}

impl ChunkWriter {
    pub fn new(dir: &Path, prefix: &str, chunk_size: usize) -> Self {
        assert!(chunk_size > 0);
        ChunkWriter {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            chunk_size,
            run: 0,
            chunk: 0,
            pending: TraceChunk::default(),
        }
    }

    fn chunk_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}_{:04}_{:04}.json.gz", self.prefix, self.run, self.chunk))
    }

    fn flush_pending(&mut self) -> Result<(), TraceError> {
        if self.pending.steps.is_empty() {
            return Ok(());
        }
        let path = self.chunk_path();
        write_chunk(&path, &self.pending)?;
        self.pending = TraceChunk::default();
        self.chunk += 1;
        Ok(())
    }

    pub fn push(&mut self, step: TraceStep) -> Result<(), TraceError> {
        self.pending.steps.push(step);
        if self.pending.steps.len() >= self.chunk_size {
            self.flush_pending()?;
        }
        Ok(())
    }

    /// Flush the current run and start the next one.
    pub fn end_run(&mut self) -> Result<(), TraceError> {
        self.flush_pending()?;
        self.run += 1;
        self.chunk = 0;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), TraceError> {
        self.flush_pending()
    }
}

// ---- RAM comparison ----

/// Bytes the comparison skips: graphic-pointer and sprite-attribute
/// scratch the render kernel owns, the two multi-purpose tmp bytes, the
/// seed scanline byte and the unused tail.
pub fn is_ignored_offset(offset: usize) -> bool {
    matches!(
        offset,
        24..=27 | 29 | 30 | 32..=40 | 42..=46 | 58..=69 | 71 | 72 | 93 | 97..=127
    )
}

/// One differing byte, with enough context to read the report without
/// the fixture at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub offset: usize,
    pub actual: u8,
    pub expected: u8,
    pub previous: Option<u8>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:3}] {}: got {:3} (0x{:02X} = 0b{:08b}), expected {:3} (0x{:02X} = 0b{:08b})",
            self.offset,
            field_name(self.offset),
            self.actual,
            self.actual,
            self.actual,
            self.expected,
            self.expected,
            self.expected,
        )?;
        if let Some(previous) = self.previous {
            write!(f, ", was {:3} (0x{:02X}) last frame", previous, previous)?;
        }
        Ok(())
    }
}

/// Compare a RAM image against an expected snapshot, skipping the
/// volatile offsets. Scans all 128 bytes and reports every difference.
pub fn compare_ram(
    actual: &[u8; RAM_SIZE],
    expected: &[u8],
    previous: Option<&[u8]>,
) -> Vec<Mismatch> {
    assert_eq!(expected.len(), RAM_SIZE);

    let mut mismatches = Vec::new();
    for offset in 0..RAM_SIZE {
        if is_ignored_offset(offset) || actual[offset] == expected[offset] {
            continue;
        }
        mismatches.push(Mismatch {
            offset,
            actual: actual[offset],
            expected: expected[offset],
            previous: previous.map(|prev| prev[offset]),
        });
    }
    mismatches
}
