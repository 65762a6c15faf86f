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

//! Allocation monitoring interface
//!
//! Lifecycle of a run:
//! enter run → (enter partition → placement* → room saved* → exit partition){0,2} → exit run
//!
//! A partition with no matched students is skipped entirely, so its enter and
//! exit hooks never fire. When a store call fails, `on_abort` fires instead of
//! `on_exit_run`; placements reported before the failure stay persisted.

use crate::{
    error::AllocationError,
    outcome::{AllocationOutcome, PartitionSummary},
};
use dorm_model::{gender::Gender, placement::Placement, request::AllocationRequest, room::Room};

/// Trait for observing the progress of an allocation run.
pub trait AllocationMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before any store query.
    fn on_enter_run(&mut self, request: &AllocationRequest);
    /// Called before a gender partition is filled, with the number of
    /// prioritized students and candidate rooms.
    fn on_enter_partition(&mut self, gender: Gender, students: usize, rooms: usize);
    /// Called after a student has been assigned and saved.
    fn on_placement(&mut self, placement: &Placement);
    /// Called after a touched room has been saved.
    fn on_room_saved(&mut self, room: &Room);
    /// Called after a partition has been filled.
    fn on_exit_partition(&mut self, summary: &PartitionSummary);
    /// Called once when the run completes.
    fn on_exit_run(&mut self, outcome: &AllocationOutcome);
    /// Called once when the run fails.
    fn on_abort(&mut self, _error: &AllocationError) {}
}

impl<M> AllocationMonitor for &mut M
where
    M: AllocationMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_run(&mut self, request: &AllocationRequest) {
        (**self).on_enter_run(request)
    }

    #[inline(always)]
    fn on_enter_partition(&mut self, gender: Gender, students: usize, rooms: usize) {
        (**self).on_enter_partition(gender, students, rooms)
    }

    #[inline(always)]
    fn on_placement(&mut self, placement: &Placement) {
        (**self).on_placement(placement)
    }

    #[inline(always)]
    fn on_room_saved(&mut self, room: &Room) {
        (**self).on_room_saved(room)
    }

    #[inline(always)]
    fn on_exit_partition(&mut self, summary: &PartitionSummary) {
        (**self).on_exit_partition(summary)
    }

    #[inline(always)]
    fn on_exit_run(&mut self, outcome: &AllocationOutcome) {
        (**self).on_exit_run(outcome)
    }

    #[inline(always)]
    fn on_abort(&mut self, error: &AllocationError) {
        (**self).on_abort(error)
    }
}

impl std::fmt::Debug for dyn AllocationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn AllocationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}
