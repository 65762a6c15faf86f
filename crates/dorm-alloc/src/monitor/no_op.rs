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

/// A monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl std::fmt::Display for NoOperationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOperationMonitor")
    }
}

impl AllocationMonitor for NoOperationMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_run(&mut self, _request: &AllocationRequest) {}

    #[inline(always)]
    fn on_enter_partition(&mut self, _gender: Gender, _students: usize, _rooms: usize) {}

    #[inline(always)]
    fn on_placement(&mut self, _placement: &Placement) {}

    #[inline(always)]
    fn on_room_saved(&mut self, _room: &Room) {}

    #[inline(always)]
    fn on_exit_partition(&mut self, _summary: &PartitionSummary) {}

    #[inline(always)]
    fn on_exit_run(&mut self, _outcome: &AllocationOutcome) {}

    #[inline(always)]
    fn on_abort(&mut self, _error: &AllocationError) {}
}
