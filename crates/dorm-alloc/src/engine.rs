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

//! # Allocation Engine
//!
//! Orchestrates one allocation run against an `AllocationStore`:
//!
//! 1. Query the unassigned students matching the request criteria. If there
//!    are none the run ends here, before any room is queried.
//! 2. Split them into the male and female partitions.
//! 3. For each partition, males first: sort by priority, query the rooms
//!    available to that gender within the request scope, and fill them.
//! 4. Fold both partitions into an `AllocationOutcome`.
//!
//! A partition without students issues no room query. The two partitions
//! never share rooms, so their order only affects the order of placements in
//! the outcome.
//!
//! ## Usage
//!
//! ```rust
//! use dorm_alloc::{engine::AllocationEngineBuilder, monitor::log::LogMonitor};
//! use dorm_model::{request::AllocationRequest, snapshot::Snapshot};
//! use dorm_store::memory::InMemoryStore;
//!
//! let store = InMemoryStore::new(Snapshot::default());
//! let mut engine = AllocationEngineBuilder::new(store)
//!     .with_monitor(LogMonitor::new())
//!     .build();
//!
//! let outcome = engine.allocate(&AllocationRequest::default()).unwrap();
//! assert_eq!(outcome.allocated(), 0);
//! ```

use crate::{
    error::{AllocationError, StoreOperation},
    filler::RoomFiller,
    monitor::{allocation_monitor::AllocationMonitor, no_op::NoOperationMonitor},
    outcome::{AllocationOutcome, PartitionOutcome},
    sorter::{PrioritySorter, partition_by_gender},
    stats::AllocationStatisticsBuilder,
};
use dorm_model::{
    gender::Gender,
    request::{AllocationRequest, RoomScope},
    student::Student,
};
use dorm_store::store::AllocationStore;
use std::time::Instant;
use tracing::{debug, info};

/// Runs allocation requests against a store.
#[derive(Debug)]
pub struct AllocationEngine<S, M = NoOperationMonitor> {
    store: S,
    monitor: M,
    sorter: PrioritySorter,
    filler: RoomFiller,
}

impl<S> AllocationEngine<S>
where
    S: AllocationStore,
{
    /// Creates an engine over `store` without monitoring.
    #[inline]
    pub fn new(store: S) -> Self {
        AllocationEngineBuilder::new(store).build()
    }
}

impl<S, M> AllocationEngine<S, M>
where
    S: AllocationStore,
    M: AllocationMonitor,
{
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[inline]
    pub fn into_store(self) -> S {
        self.store
    }

    #[inline]
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    #[inline]
    pub fn monitor_mut(&mut self) -> &mut M {
        &mut self.monitor
    }

    /// Allocates rooms to every unassigned student matching `request`.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Persistence` if a store call fails and
    /// `AllocationError::PartitionMismatch` if the store hands back a student
    /// whose gender contradicts its partition. Saves made before the failure
    /// are not rolled back.
    pub fn allocate(
        &mut self,
        request: &AllocationRequest,
    ) -> Result<AllocationOutcome, AllocationError> {
        self.monitor.on_enter_run(request);

        match self.run(request) {
            Ok(outcome) => {
                self.monitor.on_exit_run(&outcome);
                Ok(outcome)
            }
            Err(err) => {
                self.monitor.on_abort(&err);
                Err(err)
            }
        }
    }

    fn run(&mut self, request: &AllocationRequest) -> Result<AllocationOutcome, AllocationError> {
        let start_time = Instant::now();
        self.filler.reset();

        let students = self
            .store
            .find_unassigned_students(&request.criteria)
            .map_err(|e| {
                AllocationError::persistence(StoreOperation::QueryStudents, None, None, e)
            })?;

        if students.is_empty() {
            info!(criteria = %request.criteria, "no unassigned students match");
            let statistics = AllocationStatisticsBuilder::new()
                .duration(start_time.elapsed())
                .build();
            return Ok(AllocationOutcome::empty(statistics));
        }

        let students_considered = students.len();
        let (males, females) = partition_by_gender(students);

        let males = self.allocate_partition(Gender::Male, males, &request.scope)?;
        let females = self.allocate_partition(Gender::Female, females, &request.scope)?;

        let statistics = AllocationStatisticsBuilder::new()
            .students_considered(students_considered)
            .rooms_considered(males.rooms_considered + females.rooms_considered)
            .rooms_touched(males.rooms_touched + females.rooms_touched)
            .rooms_filled(males.rooms_filled + females.rooms_filled)
            .students_saved(self.filler.students_saved())
            .rooms_saved(self.filler.rooms_saved())
            .duration(start_time.elapsed())
            .build();

        Ok(AllocationOutcome::from_partitions(males, females, statistics))
    }

    fn allocate_partition(
        &mut self,
        gender: Gender,
        students: Vec<Student>,
        scope: &RoomScope,
    ) -> Result<PartitionOutcome, AllocationError> {
        if students.is_empty() {
            debug!(%gender, "partition has no students");
            return Ok(PartitionOutcome::empty(gender));
        }

        let students = self.sorter.sort(gender, students)?;
        let rooms = self
            .store
            .find_available_rooms(gender, scope)
            .map_err(|e| {
                AllocationError::persistence(StoreOperation::QueryRooms, None, None, e)
            })?;

        self.filler
            .fill(&mut self.store, &mut self.monitor, gender, students, rooms)
    }
}

/// Builder for `AllocationEngine`.
#[derive(Debug)]
pub struct AllocationEngineBuilder<S, M = NoOperationMonitor> {
    store: S,
    monitor: M,
}

impl<S> AllocationEngineBuilder<S>
where
    S: AllocationStore,
{
    #[inline]
    pub fn new(store: S) -> Self {
        Self {
            store,
            monitor: NoOperationMonitor::new(),
        }
    }
}

impl<S, M> AllocationEngineBuilder<S, M>
where
    S: AllocationStore,
    M: AllocationMonitor,
{
    /// Replaces the monitor.
    #[inline]
    pub fn with_monitor<N>(self, monitor: N) -> AllocationEngineBuilder<S, N>
    where
        N: AllocationMonitor,
    {
        AllocationEngineBuilder {
            store: self.store,
            monitor,
        }
    }

    #[inline]
    pub fn build(self) -> AllocationEngine<S, M> {
        AllocationEngine {
            store: self.store,
            monitor: self.monitor,
            sorter: PrioritySorter::new(),
            filler: RoomFiller::new(),
        }
    }
}
