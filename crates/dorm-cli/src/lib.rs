// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Command-line front end for the allocation engine.
//!
//! Loads a JSON snapshot of students and rooms, runs one allocation request
//! against it through an `InMemoryStore`, prints the result and optionally
//! writes the updated snapshot back out.

use anyhow::{Context, bail};
use clap::Parser;
use dorm_alloc::{engine::AllocationEngineBuilder, error::AllocationError, monitor::log::LogMonitor};
use dorm_model::{
    error::ModelError,
    request::AllocationRequest,
    snapshot::{Snapshot, SnapshotError},
};
use dorm_store::memory::InMemoryStore;
use serde_json::error::Category;
use std::{io::Write, path::PathBuf};
use tracing::info;

/// Allocate dormitory rooms to unassigned students.
#[derive(Debug, Parser)]
#[command(name = "dorm", version)]
pub struct Cli {
    /// Path to the JSON snapshot of students and rooms.
    #[arg(short, long, value_name = "PATH")]
    pub snapshot: PathBuf,

    /// Read the request (criteria and target scope) from a JSON file.
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["department", "year", "gender", "building", "block"]
    )]
    pub request: Option<PathBuf>,

    /// Only allocate students of this department.
    #[arg(long)]
    pub department: Option<String>,

    /// Only allocate students in this year of study.
    #[arg(long)]
    pub year: Option<String>,

    /// Only allocate students of this gender (M/F, male/female).
    #[arg(long)]
    pub gender: Option<String>,

    /// Only use rooms in this building.
    #[arg(long)]
    pub building: Option<String>,

    /// Only use rooms in this block.
    #[arg(long)]
    pub block: Option<String>,

    /// Write the updated snapshot to this path.
    #[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Write the updated snapshot back over the input snapshot.
    #[arg(long)]
    pub in_place: bool,

    /// Print the response as JSON instead of a report.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the allocation request from either `--request` or the
    /// individual filter flags.
    pub fn allocation_request(&self) -> anyhow::Result<AllocationRequest> {
        if let Some(path) = &self.request {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read request {}", path.display()))?;
            return AllocationRequest::from_json_str(&raw)
                .with_context(|| format!("invalid request in {}", path.display()));
        }

        AllocationRequest::parse(
            self.department.as_deref(),
            self.year.as_deref(),
            self.gender.as_deref(),
            self.building.as_deref(),
            self.block.as_deref(),
        )
        .context("invalid request")
    }

    /// Where the updated snapshot should go, if anywhere.
    pub fn output_path(&self) -> Option<&PathBuf> {
        if self.in_place {
            Some(&self.snapshot)
        } else {
            self.output.as_ref()
        }
    }
}

/// Runs one allocation as described by `cli`, writing the result to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let request = cli.allocation_request()?;
    let snapshot = Snapshot::from_path(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;
    info!(
        students = snapshot.students.len(),
        rooms = snapshot.rooms.len(),
        path = %cli.snapshot.display(),
        "loaded snapshot"
    );

    let mut engine = AllocationEngineBuilder::new(InMemoryStore::new(snapshot))
        .with_monitor(LogMonitor::new())
        .build();
    let result = engine.allocate(&request);

    // Saves made before a failure are committed, so the snapshot is written
    // either way.
    if let Some(path) = cli.output_path() {
        engine
            .into_store()
            .into_snapshot()
            .write_to_path(path)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "wrote snapshot");
    }

    let outcome = result.context("allocation failed")?;
    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &outcome.response())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", outcome)?;
        writeln!(out)?;
        write!(out, "{}", outcome.statistics())?;
    }
    Ok(())
}

/// Process exit code for `err`: 2 for malformed input, 1 otherwise.
///
/// Malformed input covers invalid request values from flags or a request
/// file, and snapshots whose content fails to parse or validate.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.chain().any(is_client_cause) { 2 } else { 1 }
}

fn is_client_cause(cause: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(err) = cause.downcast_ref::<AllocationError>() {
        return err.is_client_error();
    }
    if let Some(err) = cause.downcast_ref::<SnapshotError>() {
        return err.is_malformed();
    }
    if let Some(err) = cause.downcast_ref::<serde_json::Error>() {
        return matches!(err.classify(), Category::Data | Category::Syntax | Category::Eof);
    }
    cause.is::<ModelError>()
}

/// Rejects flag combinations clap cannot express.
pub fn validate(cli: &Cli) -> anyhow::Result<()> {
    if cli.in_place && cli.request.as_ref() == Some(&cli.snapshot) {
        bail!("--request and --snapshot must be different files when writing in place");
    }
    Ok(())
}
