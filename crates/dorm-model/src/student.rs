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

use crate::{error::ModelError, gender::Gender, room::RoomId};
use serde::{Deserialize, Serialize};

/// The unique identifier of a student (e.g. a registration number).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new `StudentId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyIdentifier` if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyIdentifier { kind: "student" });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StudentId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

/// A student record as seen by the allocation engine.
///
/// The engine only ever mutates the `room` field. Everything else is fixed at
/// construction, and construction validates that the year of study is
/// positive; a `Student` therefore always has a resolved gender and a
/// meaningful seniority.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StudentRecord")]
pub struct Student {
    id: StudentId,
    full_name: String,
    gender: Gender,
    department: String,
    year: u32,
    room: Option<RoomId>,
}

impl Student {
    /// Creates a new, unassigned `Student`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidYear` if `year` is zero.
    pub fn new(
        id: StudentId,
        full_name: impl Into<String>,
        gender: Gender,
        department: impl Into<String>,
        year: u32,
    ) -> Result<Self, ModelError> {
        if year == 0 {
            return Err(ModelError::InvalidYear(year.to_string()));
        }

        Ok(Self {
            id,
            full_name: full_name.into(),
            gender,
            department: department.into(),
            year,
            room: None,
        })
    }

    /// Returns this student already holding `room`.
    #[inline]
    pub fn with_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    #[inline]
    pub fn id(&self) -> &StudentId {
        &self.id
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
    pub fn department(&self) -> &str {
        &self.department
    }

    #[inline]
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Returns the room currently held by this student, if any.
    #[inline]
    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.room.is_some()
    }

    /// First-year students.
    #[inline]
    pub fn is_freshman(&self) -> bool {
        self.year == 1
    }

    /// Students beyond their first year; they are placed before freshmen.
    #[inline]
    pub fn is_senior(&self) -> bool {
        self.year > 1
    }

    /// Links this student to `room`, replacing any previous link.
    #[inline]
    pub fn assign_to(&mut self, room: RoomId) {
        self.room = Some(room);
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentRecord {
    id: StudentId,
    full_name: String,
    gender: Gender,
    department: String,
    year: u32,
    #[serde(default)]
    room: Option<RoomId>,
}

impl TryFrom<StudentRecord> for Student {
    type Error = ModelError;

    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        let student = Student::new(
            record.id,
            record.full_name,
            record.gender,
            record.department,
            record.year,
        )?;

        Ok(match record.room {
            Some(room) => student.with_room(room),
            None => student,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(id: &str) -> StudentId {
        StudentId::new(id).unwrap()
    }

    #[test]
    fn test_student_id_trims_and_rejects_blank() {
        assert_eq!(sid("  ETS0001/14 ").as_str(), "ETS0001/14");
        assert_eq!(
            StudentId::new("   "),
            Err(ModelError::EmptyIdentifier { kind: "student" })
        );
    }

    #[test]
    fn test_new_student_is_unassigned() {
        let s = Student::new(sid("s1"), "Abel Tesfaye", Gender::Male, "CS", 1).unwrap();
        assert_eq!(s.id().as_str(), "s1");
        assert_eq!(s.full_name(), "Abel Tesfaye");
        assert_eq!(s.gender(), Gender::Male);
        assert_eq!(s.department(), "CS");
        assert_eq!(s.year(), 1);
        assert!(!s.is_assigned());
        assert!(s.room().is_none());
    }

    #[test]
    fn test_year_zero_is_rejected() {
        let err = Student::new(sid("s1"), "Abel", Gender::Male, "CS", 0).unwrap_err();
        assert_eq!(err, ModelError::InvalidYear("0".to_string()));
    }

    #[test]
    fn test_seniority_classification() {
        let fresh = Student::new(sid("a"), "A", Gender::Female, "EE", 1).unwrap();
        let senior = Student::new(sid("b"), "B", Gender::Female, "EE", 4).unwrap();
        assert!(fresh.is_freshman() && !fresh.is_senior());
        assert!(senior.is_senior() && !senior.is_freshman());
    }

    #[test]
    fn test_assign_to_replaces_link() {
        let mut s = Student::new(sid("a"), "A", Gender::Female, "EE", 2).unwrap();
        let room = RoomId::new("r-1").unwrap();
        s.assign_to(room.clone());
        assert_eq!(s.room(), Some(&room));
        let other = RoomId::new("r-2").unwrap();
        s.assign_to(other.clone());
        assert_eq!(s.room(), Some(&other));
        assert!(s.is_assigned());
    }

    #[test]
    fn test_deserialize_validates_record() {
        let json = r#"{"id":"s9","fullName":"Hana","gender":"female","department":"Law","year":3}"#;
        let s: Student = serde_json::from_str(json).unwrap();
        assert_eq!(s.gender(), Gender::Female);
        assert_eq!(s.year(), 3);
        assert!(s.room().is_none());

        let bad_year = r#"{"id":"s9","fullName":"Hana","gender":"F","department":"Law","year":0}"#;
        assert!(serde_json::from_str::<Student>(bad_year).is_err());

        let bad_gender = r#"{"id":"s9","fullName":"Hana","gender":"?","department":"Law","year":2}"#;
        assert!(serde_json::from_str::<Student>(bad_gender).is_err());

        let blank_id = r#"{"id":" ","fullName":"Hana","gender":"F","department":"Law","year":2}"#;
        assert!(serde_json::from_str::<Student>(blank_id).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let s = Student::new(sid("s1"), "Abel", Gender::Male, "CS", 2)
            .unwrap()
            .with_room(RoomId::new("r1").unwrap());
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"fullName\":\"Abel\""));
        assert!(json.contains("\"gender\":\"M\""));
        assert!(json.contains("\"room\":\"r1\""));

        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
