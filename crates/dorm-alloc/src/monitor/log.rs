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

use crate::{
    error::AllocationError,
    monitor::allocation_monitor::AllocationMonitor,
    outcome::{AllocationOutcome, PartitionSummary},
};
use dorm_model::{gender::Gender, placement::Placement, request::AllocationRequest, room::Room};
use std::time::Instant;
use tracing::{debug, error, info};

/// Reports run progress through `tracing`.
///
/// Run and partition boundaries are logged at `info`, individual placements
/// and room saves at `debug`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    placements: usize,
    rooms_saved: usize,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            placements: 0,
            rooms_saved: 0,
        }
    }

    /// Placements observed since the run started.
    #[inline]
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Room saves observed since the run started.
    #[inline]
    pub fn rooms_saved(&self) -> usize {
        self.rooms_saved
    }

    #[inline(always)]
    fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(placements: {}, rooms_saved: {})",
            self.placements, self.rooms_saved
        )
    }
}

impl AllocationMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_run(&mut self, request: &AllocationRequest) {
        self.start_time = Instant::now();
        self.placements = 0;
        self.rooms_saved = 0;
        info!(
            criteria = %request.criteria,
            scope = %request.scope,
            "starting allocation"
        );
    }

    fn on_enter_partition(&mut self, gender: Gender, students: usize, rooms: usize) {
        info!(%gender, students, rooms, "filling partition");
    }

    fn on_placement(&mut self, placement: &Placement) {
        self.placements += 1;
        debug!(%placement, "placed student");
    }

    fn on_room_saved(&mut self, room: &Room) {
        self.rooms_saved += 1;
        debug!(%room, "saved room");
    }

    fn on_exit_partition(&mut self, summary: &PartitionSummary) {
        info!(
            gender = %summary.gender,
            allocated = summary.allocated,
            unallocated = summary.unallocated,
            rooms_touched = summary.rooms_touched,
            rooms_filled = summary.rooms_filled,
            "partition done"
        );
    }

    fn on_exit_run(&mut self, outcome: &AllocationOutcome) {
        info!(
            allocated = outcome.allocated(),
            unallocated = outcome.unallocated(),
            elapsed_ms = self.elapsed_ms(),
            "allocation finished"
        );
    }

    fn on_abort(&mut self, err: &AllocationError) {
        error!(
            error = %err,
            placements = self.placements,
            rooms_saved = self.rooms_saved,
            elapsed_ms = self.elapsed_ms(),
            "allocation aborted"
        );
    }
}
