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
    gender::Gender,
    room::{Room, RoomId},
    student::{Student, StudentId},
};

/// A single student-to-room assignment produced by one allocation run.
///
/// Placements are recorded in the order the engine makes them, so a list of
/// placements doubles as an audit trail of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    student_id: StudentId,
    full_name: String,
    gender: Gender,
    year: u32,
    department: String,
    room_id: RoomId,
    room_label: String,
}

impl Placement {
    /// Records `student` being placed in `room`.
    pub fn new(student: &Student, room: &Room) -> Self {
        Self {
            student_id: student.id().clone(),
            full_name: student.full_name().to_string(),
            gender: student.gender(),
            year: student.year(),
            department: student.department().to_string(),
            room_id: room.id().clone(),
            room_label: room.label(),
        }
    }

    #[inline]
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    pub fn year(&self) -> u32 {
        self.year
    }

    #[inline]
    pub fn department(&self) -> &str {
        &self.department
    }

    #[inline]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// The room label as shown in reports.
    #[inline]
    pub fn room_label(&self) -> &str {
        &self.room_label
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} year {}) -> {}",
            self.student_id, self.full_name, self.department, self.year, self.room_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gender::RoomGender;

    #[test]
    fn test_placement_copies_student_and_room_fields() {
        let student = Student::new(
            StudentId::new("s1").unwrap(),
            "Amanuel Bekele",
            Gender::Male,
            "CS",
            3,
        )
        .unwrap();
        let room = Room::new(
            RoomId::new("r1").unwrap(),
            "B2",
            "C",
            1,
            "104",
            4,
            RoomGender::Male,
        )
        .unwrap();

        let p = Placement::new(&student, &room);
        assert_eq!(p.student_id().as_str(), "s1");
        assert_eq!(p.full_name(), "Amanuel Bekele");
        assert_eq!(p.gender(), Gender::Male);
        assert_eq!(p.year(), 3);
        assert_eq!(p.department(), "CS");
        assert_eq!(p.room_id().as_str(), "r1");
        assert_eq!(p.room_label(), "B2-C-104");
        assert_eq!(
            p.to_string(),
            "s1 (Amanuel Bekele, CS year 3) -> B2-C-104"
        );
    }
}
