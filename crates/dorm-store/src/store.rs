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

use crate::error::StoreError;
use dorm_model::{
    gender::Gender,
    request::{RoomScope, StudentCriteria},
    room::Room,
    student::Student,
};

/// The storage collaborator used by the allocation engine.
///
/// Queries return owned copies; the engine mutates its copies and writes each
/// one back with a save. Saves are independent: there is no transaction
/// spanning several calls, so a failed save leaves every earlier save in place.
pub trait AllocationStore {
    /// Returns the name of the store, used in logs.
    fn name(&self) -> &str;

    /// Returns every student without a room that satisfies `criteria`, in
    /// store order.
    fn find_unassigned_students(
        &self,
        criteria: &StudentCriteria,
    ) -> Result<Vec<Student>, StoreError>;

    /// Returns the rooms designated exactly for `gender` that are not under
    /// maintenance and lie within `scope`, ordered by building, floor and
    /// room number (see `dorm_model::room::RoomOrderKey`).
    fn find_available_rooms(&self, gender: Gender, scope: &RoomScope)
    -> Result<Vec<Room>, StoreError>;

    /// Persists a student's room link.
    fn save_student(&mut self, student: &Student) -> Result<(), StoreError>;

    /// Persists a room's occupant list and status.
    fn save_room(&mut self, room: &Room) -> Result<(), StoreError>;
}

impl<S> AllocationStore for &mut S
where
    S: AllocationStore + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn find_unassigned_students(
        &self,
        criteria: &StudentCriteria,
    ) -> Result<Vec<Student>, StoreError> {
        (**self).find_unassigned_students(criteria)
    }

    #[inline]
    fn find_available_rooms(
        &self,
        gender: Gender,
        scope: &RoomScope,
    ) -> Result<Vec<Room>, StoreError> {
        (**self).find_available_rooms(gender, scope)
    }

    #[inline]
    fn save_student(&mut self, student: &Student) -> Result<(), StoreError> {
        (**self).save_student(student)
    }

    #[inline]
    fn save_room(&mut self, room: &Room) -> Result<(), StoreError> {
        (**self).save_room(room)
    }
}

impl std::fmt::Debug for dyn AllocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationStore({})", self.name())
    }
}

impl std::fmt::Display for dyn AllocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationStore({})", self.name())
    }
}
