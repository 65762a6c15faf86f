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

//! Greedy first-fit room filling for one gender partition.
//!
//! Rooms are walked in the order the store returned them. Each room takes as
//! many of the next students as it has free beds; every admitted student is
//! saved individually, then the room is saved once with its refreshed
//! status. Rooms that receive nobody are never written, so their status is
//! left exactly as it was.

use crate::{
    error::{AllocationError, StoreOperation},
    monitor::allocation_monitor::AllocationMonitor,
    outcome::{PartitionOutcome, UnplacedReason, UnplacedStudent},
};
use dorm_model::{gender::Gender, placement::Placement, room::Room, student::Student};
use dorm_store::store::AllocationStore;
use tracing::{debug, trace, warn};

/// Places a prioritized student sequence into an ordered room sequence.
///
/// The filler keeps running save counters across calls so that one filler
/// can serve both partitions of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFiller {
    students_saved: usize,
    rooms_saved: usize,
}

impl RoomFiller {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful student saves since creation or the last `reset`.
    #[inline]
    pub fn students_saved(&self) -> usize {
        self.students_saved
    }

    /// Successful room saves since creation or the last `reset`.
    #[inline]
    pub fn rooms_saved(&self) -> usize {
        self.rooms_saved
    }

    #[inline]
    pub fn reset(&mut self) {
        self.students_saved = 0;
        self.rooms_saved = 0;
    }

    /// Fills `rooms` with `students` for the `gender` partition.
    ///
    /// `students` must already be in priority order. Rooms that are not
    /// designated exactly for `gender` or are under maintenance are skipped.
    /// Students left over once the rooms run out are reported as unplaced and
    /// are not written to the store.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::PartitionMismatch` if a student of the other
    /// gender is reached, and `AllocationError::Persistence` if a save fails.
    /// In both cases every save made before the failure stays in the store.
    pub fn fill<S, M>(
        &mut self,
        store: &mut S,
        monitor: &mut M,
        gender: Gender,
        students: Vec<Student>,
        rooms: Vec<Room>,
    ) -> Result<PartitionOutcome, AllocationError>
    where
        S: AllocationStore + ?Sized,
        M: AllocationMonitor + ?Sized,
    {
        monitor.on_enter_partition(gender, students.len(), rooms.len());

        let mut outcome = PartitionOutcome::empty(gender);
        outcome.rooms_considered = rooms.len();

        let mut eligible_rooms = 0usize;
        let mut queue = students.into_iter().peekable();

        for mut room in rooms {
            if !room.gender().is_exactly(gender) || room.is_under_maintenance() {
                warn!(%room, partition = %gender, "skipping room outside the partition");
                continue;
            }
            eligible_rooms += 1;

            if queue.peek().is_none() {
                break;
            }

            let available = room.vacancies();
            if available == 0 {
                trace!(%room, "room has no vacancies");
                continue;
            }

            for mut student in queue.by_ref().take(available) {
                if student.gender() != gender {
                    return Err(AllocationError::PartitionMismatch {
                        student: student.id().clone(),
                        expected: gender,
                        found: student.gender(),
                    });
                }

                room.admit(student.id().clone())?;
                student.assign_to(room.id().clone());
                store.save_student(&student).map_err(|e| {
                    AllocationError::persistence(
                        StoreOperation::SaveStudent,
                        Some(student.id()),
                        Some(room.id()),
                        e,
                    )
                })?;
                self.students_saved += 1;

                let placement = Placement::new(&student, &room);
                monitor.on_placement(&placement);
                outcome.placements.push(placement);
            }

            room.refresh_status();
            store.save_room(&room).map_err(|e| {
                AllocationError::persistence(StoreOperation::SaveRoom, None, Some(room.id()), e)
            })?;
            self.rooms_saved += 1;
            outcome.rooms_touched += 1;
            if room.is_full() {
                outcome.rooms_filled += 1;
            }
            debug!(%room, "room saved");
            monitor.on_room_saved(&room);
        }

        let reason = if eligible_rooms == 0 {
            UnplacedReason::NoRoomsAvailable
        } else {
            UnplacedReason::CapacityExhausted
        };
        outcome.unplaced = queue
            .map(|student| UnplacedStudent::new(&student, reason))
            .collect();

        monitor.on_exit_partition(&outcome.summary());
        Ok(outcome)
    }
}
