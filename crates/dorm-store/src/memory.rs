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

//! In-memory reference implementation of `AllocationStore`.
//!
//! `InMemoryStore` owns a validated `Snapshot` and answers queries by scanning
//! it, which keeps the query semantics obvious: unassigned students come back
//! in snapshot order, candidate rooms come back sorted by their walk-order
//! key with snapshot order breaking ties. Saves overwrite the stored record
//! by id.
//!
//! The store also counts its operations and can be told to start failing
//! saves after a given number of successes. Both exist so that callers can
//! observe exactly which writes an allocation run performed, and what state a
//! run leaves behind when the backend fails partway through.

use crate::{error::StoreError, store::AllocationStore};
use dorm_model::{
    gender::Gender,
    index::{RoomIndex, StudentIndex},
    request::{RoomScope, StudentCriteria},
    room::{Room, RoomId},
    snapshot::Snapshot,
    student::{Student, StudentId},
};
use rustc_hash::FxHashMap;
use std::cell::Cell;
use tracing::{debug, trace};

/// Operation counters of an `InMemoryStore`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounters {
    /// Calls to `find_unassigned_students`.
    pub student_queries: usize,
    /// Calls to `find_available_rooms`.
    pub room_queries: usize,
    /// Successful student saves.
    pub students_saved: usize,
    /// Successful room saves.
    pub rooms_saved: usize,
}

impl std::fmt::Display for StoreCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "queries: {} student / {} room, saves: {} student / {} room",
            self.student_queries, self.room_queries, self.students_saved, self.rooms_saved
        )
    }
}

/// A store backed by an in-memory `Snapshot`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshot: Snapshot,
    student_positions: FxHashMap<StudentId, StudentIndex>,
    room_positions: FxHashMap<RoomId, RoomIndex>,
    student_queries: Cell<usize>,
    room_queries: Cell<usize>,
    students_saved: usize,
    rooms_saved: usize,
    student_save_budget: Option<usize>,
    room_save_budget: Option<usize>,
}

impl InMemoryStore {
    /// Creates a store over `snapshot`.
    ///
    /// The snapshot is expected to be valid (see `Snapshot::validate`);
    /// snapshots built through `Snapshot::new` or loaded from JSON always are.
    pub fn new(snapshot: Snapshot) -> Self {
        let student_positions = snapshot
            .students
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id().clone(), StudentIndex::new(i)))
            .collect();
        let room_positions = snapshot
            .rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id().clone(), RoomIndex::new(i)))
            .collect();

        Self {
            snapshot,
            student_positions,
            room_positions,
            ..Default::default()
        }
    }

    /// Makes every student save after the first `successes` fail with
    /// `StoreError::Unavailable`.
    #[inline]
    pub fn fail_student_saves_after(mut self, successes: usize) -> Self {
        self.student_save_budget = Some(successes);
        self
    }

    /// Makes every room save after the first `successes` fail with
    /// `StoreError::Unavailable`.
    #[inline]
    pub fn fail_room_saves_after(mut self, successes: usize) -> Self {
        self.room_save_budget = Some(successes);
        self
    }

    /// Returns the current state of the stored snapshot.
    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Consumes the store and returns its snapshot.
    #[inline]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Looks up a stored student by id.
    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.student_positions
            .get(id)
            .map(|i| &self.snapshot.students[i.get()])
    }

    /// Looks up a stored room by id.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.room_positions
            .get(id)
            .map(|i| &self.snapshot.rooms[i.get()])
    }

    /// Returns the operation counters accumulated so far.
    pub fn counters(&self) -> StoreCounters {
        StoreCounters {
            student_queries: self.student_queries.get(),
            room_queries: self.room_queries.get(),
            students_saved: self.students_saved,
            rooms_saved: self.rooms_saved,
        }
    }

    fn check_budget(
        budget: Option<usize>,
        done: usize,
        what: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        match budget {
            Some(limit) if done >= limit => Err(StoreError::Unavailable(format!(
                "injected failure while saving {} {}",
                what, id
            ))),
            _ => Ok(()),
        }
    }
}

impl From<Snapshot> for InMemoryStore {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot)
    }
}

impl AllocationStore for InMemoryStore {
    fn name(&self) -> &str {
        "InMemoryStore"
    }

    fn find_unassigned_students(
        &self,
        criteria: &StudentCriteria,
    ) -> Result<Vec<Student>, StoreError> {
        self.student_queries.set(self.student_queries.get() + 1);

        let students: Vec<Student> = self
            .snapshot
            .students
            .iter()
            .filter(|s| !s.is_assigned() && criteria.matches(s))
            .cloned()
            .collect();

        trace!(
            matched = students.len(),
            criteria = %criteria,
            "queried unassigned students"
        );
        Ok(students)
    }

    fn find_available_rooms(
        &self,
        gender: Gender,
        scope: &RoomScope,
    ) -> Result<Vec<Room>, StoreError> {
        self.room_queries.set(self.room_queries.get() + 1);

        let mut rooms: Vec<Room> = self
            .snapshot
            .rooms
            .iter()
            .filter(|r| {
                r.gender().is_exactly(gender) && !r.is_under_maintenance() && scope.contains(r)
            })
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

        trace!(
            matched = rooms.len(),
            gender = %gender,
            scope = %scope,
            "queried available rooms"
        );
        Ok(rooms)
    }

    fn save_student(&mut self, student: &Student) -> Result<(), StoreError> {
        Self::check_budget(
            self.student_save_budget,
            self.students_saved,
            "student",
            student.id().as_str(),
        )?;

        let index = *self
            .student_positions
            .get(student.id())
            .ok_or_else(|| StoreError::StudentNotFound(student.id().to_string()))?;

        self.snapshot.students[index.get()] = student.clone();
        self.students_saved += 1;

        debug!(student = %student.id(), room = ?student.room(), "saved student");
        Ok(())
    }

    fn save_room(&mut self, room: &Room) -> Result<(), StoreError> {
        Self::check_budget(
            self.room_save_budget,
            self.rooms_saved,
            "room",
            room.id().as_str(),
        )?;

        let index = *self
            .room_positions
            .get(room.id())
            .ok_or_else(|| StoreError::RoomNotFound(room.id().to_string()))?;

        for occupant in room.occupants() {
            let student = self
                .student(occupant)
                .ok_or_else(|| StoreError::StudentNotFound(occupant.to_string()))?;
            if !room.gender().admits(student.gender()) {
                return Err(StoreError::GenderViolation {
                    room: room.id().to_string(),
                    student: occupant.to_string(),
                });
            }
        }

        self.snapshot.rooms[index.get()] = room.clone();
        self.rooms_saved += 1;

        debug!(
            room = %room.id(),
            occupants = room.occupants().len(),
            capacity = room.capacity(),
            status = %room.status(),
            "saved room"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorm_model::{
        gender::RoomGender,
        room::RoomStatus,
    };

    fn sid(id: &str) -> StudentId {
        StudentId::new(id).unwrap()
    }

    fn rid(id: &str) -> RoomId {
        RoomId::new(id).unwrap()
    }

    fn student(id: &str, gender: Gender, department: &str, year: u32) -> Student {
        Student::new(sid(id), id, gender, department, year).unwrap()
    }

    fn room(id: &str, building: &str, floor: i32, number: &str, gender: RoomGender) -> Room {
        Room::new(rid(id), building, "A", floor, number, 2, gender).unwrap()
    }

    fn campus() -> InMemoryStore {
        let students = vec![
            student("s1", Gender::Male, "CS", 1),
            student("s2", Gender::Female, "CS", 2).with_room(rid("f1")),
            student("s3", Gender::Female, "EE", 2),
            student("s4", Gender::Male, "EE", 3),
        ];
        let rooms = vec![
            room("m2", "B1", 1, "10", RoomGender::Male),
            room("m1", "B1", 1, "9", RoomGender::Male),
            room("m3", "B0", 4, "1", RoomGender::Male),
            room("mx", "B1", 0, "1", RoomGender::Male).with_status(RoomStatus::UnderMaintenance),
            room("c1", "B1", 0, "2", RoomGender::Coed),
            room("f1", "B2", 0, "1", RoomGender::Female)
                .with_occupants(vec![sid("s2")])
                .unwrap(),
        ];
        InMemoryStore::new(Snapshot::new(students, rooms).unwrap())
    }

    #[test]
    fn test_unassigned_students_respect_criteria_and_order() {
        let store = campus();

        let all = store.find_unassigned_students(&StudentCriteria::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3", "s4"]);

        let ee = StudentCriteria::parse(Some("EE"), None, None).unwrap();
        let ids: Vec<String> = store
            .find_unassigned_students(&ee)
            .unwrap()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec!["s3", "s4"]);

        assert_eq!(store.counters().student_queries, 2);
    }

    #[test]
    fn test_available_rooms_filter_and_sort() {
        let store = campus();

        let rooms = store
            .find_available_rooms(Gender::Male, &RoomScope::default())
            .unwrap();
        let ids: Vec<&str> = rooms.iter().map(|r| r.id().as_str()).collect();
        // co-ed and maintenance rooms are excluded, order is building/floor/number
        assert_eq!(ids, vec!["m3", "m1", "m2"]);

        let scoped = store
            .find_available_rooms(Gender::Male, &RoomScope::new(Some("B1"), None))
            .unwrap();
        assert_eq!(scoped.len(), 2);

        let female = store
            .find_available_rooms(Gender::Female, &RoomScope::default())
            .unwrap();
        assert_eq!(female.len(), 1);
        assert_eq!(store.counters().room_queries, 3);
    }

    #[test]
    fn test_save_student_and_room() {
        let mut store = campus();

        let mut s1 = store.student(&sid("s1")).unwrap().clone();
        let mut m1 = store.room(&rid("m1")).unwrap().clone();
        s1.assign_to(m1.id().clone());
        m1.admit(s1.id().clone()).unwrap();
        m1.refresh_status();

        store.save_student(&s1).unwrap();
        store.save_room(&m1).unwrap();

        assert_eq!(store.student(&sid("s1")).unwrap().room(), Some(&rid("m1")));
        assert!(store.room(&rid("m1")).unwrap().houses(&sid("s1")));
        assert_eq!(store.counters().students_saved, 1);
        assert_eq!(store.counters().rooms_saved, 1);
        assert!(store.snapshot().validate().is_ok());
    }

    #[test]
    fn test_save_unknown_records_fails() {
        let mut store = campus();
        let ghost = student("ghost", Gender::Male, "CS", 1);
        assert_eq!(
            store.save_student(&ghost),
            Err(StoreError::StudentNotFound("ghost".to_string()))
        );

        let nowhere = room("nowhere", "B9", 0, "1", RoomGender::Male);
        assert_eq!(
            store.save_room(&nowhere),
            Err(StoreError::RoomNotFound("nowhere".to_string()))
        );
    }

    #[test]
    fn test_save_room_rejects_gender_violation() {
        let mut store = campus();
        let mut m1 = store.room(&rid("m1")).unwrap().clone();
        m1.admit(sid("s3")).unwrap();
        assert!(matches!(
            store.save_room(&m1),
            Err(StoreError::GenderViolation { .. })
        ));
        assert_eq!(store.counters().rooms_saved, 0);
    }

    #[test]
    fn test_injected_failures() {
        let mut store = campus().fail_student_saves_after(1).fail_room_saves_after(0);

        let s1 = store.student(&sid("s1")).unwrap().clone();
        let s3 = store.student(&sid("s3")).unwrap().clone();
        assert!(store.save_student(&s1).is_ok());
        let err = store.save_student(&s3).unwrap_err();
        assert!(err.is_backend_failure());

        let m1 = store.room(&rid("m1")).unwrap().clone();
        assert!(store.save_room(&m1).unwrap_err().is_backend_failure());

        assert_eq!(store.counters().students_saved, 1);
        assert_eq!(store.counters().rooms_saved, 0);
    }

    #[test]
    fn test_mutable_reference_is_a_store() {
        fn query<S: AllocationStore>(store: S) -> usize {
            store
                .find_unassigned_students(&StudentCriteria::default())
                .unwrap()
                .len()
        }

        let mut store = campus();
        assert_eq!(query(&mut store), 3);
        assert_eq!(store.counters().student_queries, 1);
    }
}
