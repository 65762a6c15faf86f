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

//! Monitoring combinators for allocation runs
//!
//! Provides `CompositeMonitor`, a fan-out monitor that forwards every event
//! to its children in insertion order.

use crate::{
    error::AllocationError,
    monitor::allocation_monitor::AllocationMonitor,
    outcome::{AllocationOutcome, PartitionSummary},
};
use dorm_model::{gender::Gender, placement::Placement, request::AllocationRequest, room::Room};

/// An allocation monitor that forwards events to all of its children.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn AllocationMonitor + 'a>>,
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: AllocationMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn AllocationMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn AllocationMonitor + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn AllocationMonitor + 'a>> for CompositeMonitor<'a> {
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn AllocationMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl AllocationMonitor for CompositeMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter_run(&mut self, request: &AllocationRequest) {
        for monitor in &mut self.monitors {
            monitor.on_enter_run(request);
        }
    }

    #[inline(always)]
    fn on_enter_partition(&mut self, gender: Gender, students: usize, rooms: usize) {
        for monitor in &mut self.monitors {
            monitor.on_enter_partition(gender, students, rooms);
        }
    }

    #[inline(always)]
    fn on_placement(&mut self, placement: &Placement) {
        for monitor in &mut self.monitors {
            monitor.on_placement(placement);
        }
    }

    #[inline(always)]
    fn on_room_saved(&mut self, room: &Room) {
        for monitor in &mut self.monitors {
            monitor.on_room_saved(room);
        }
    }

    #[inline(always)]
    fn on_exit_partition(&mut self, summary: &PartitionSummary) {
        for monitor in &mut self.monitors {
            monitor.on_exit_partition(summary);
        }
    }

    #[inline(always)]
    fn on_exit_run(&mut self, outcome: &AllocationOutcome) {
        for monitor in &mut self.monitors {
            monitor.on_exit_run(outcome);
        }
    }

    #[inline(always)]
    fn on_abort(&mut self, error: &AllocationError) {
        for monitor in &mut self.monitors {
            monitor.on_abort(error);
        }
    }
}
