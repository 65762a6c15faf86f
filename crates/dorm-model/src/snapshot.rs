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

//! Serialisable snapshots of the student and room collections.
//!
//! A `Snapshot` is what a store hands to the engine (and what the command-line
//! front end reads from and writes to disk). Loading a snapshot checks more
//! than each record in isolation: ids must be unique, every occupant must be a
//! known student, and a student's room link must agree with that room's
//! occupant list. A snapshot that passes these checks satisfies the "at most
//! one room per student" part of the allocation invariant.

use crate::{error::ModelError, room::Room, student::Student};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Errors raised while loading, checking, or writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("student {0} appears more than once")]
    DuplicateStudent(String),

    #[error("room {0} appears more than once")]
    DuplicateRoom(String),

    #[error("room {room} lists unknown student {student}")]
    UnknownOccupant { room: String, student: String },

    #[error("student {student} is linked to room {room}, which does not list them")]
    InconsistentAssignment { student: String, room: String },

    #[error("student {student} is listed in room {room} but linked to {linked}")]
    DanglingOccupant {
        student: String,
        room: String,
        linked: String,
    },
}

/// The full set of students and rooms known to a store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl SnapshotError {
    /// Returns `true` if the snapshot content itself is at fault, as opposed
    /// to the file system.
    pub fn is_malformed(&self) -> bool {
        match self {
            SnapshotError::Io(_) => false,
            SnapshotError::Json(e) => !e.is_io(),
            _ => true,
        }
    }
}

impl Snapshot {
    /// Creates a snapshot after checking referential consistency.
    ///
    /// # Errors
    ///
    /// See [`Snapshot::validate`].
    pub fn new(students: Vec<Student>, rooms: Vec<Room>) -> Result<Self, SnapshotError> {
        let snapshot = Self { students, rooms };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parses and checks a snapshot from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(s)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parses and checks a snapshot from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parses and checks a snapshot from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the snapshot to `path` as pretty-printed JSON.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json_string_pretty()?)?;
        Ok(())
    }

    /// Checks id uniqueness and that student links and room occupant lists agree.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found, scanning students before rooms.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut links: HashMap<&str, Option<&str>> = HashMap::with_capacity(self.students.len());
        for student in &self.students {
            let link = student.room().map(|r| r.as_str());
            if links.insert(student.id().as_str(), link).is_some() {
                return Err(SnapshotError::DuplicateStudent(student.id().to_string()));
            }
        }

        let mut room_ids: HashSet<&str> = HashSet::with_capacity(self.rooms.len());
        for room in &self.rooms {
            if !room_ids.insert(room.id().as_str()) {
                return Err(SnapshotError::DuplicateRoom(room.id().to_string()));
            }

            for occupant in room.occupants() {
                match links.get(occupant.as_str()) {
                    None => {
                        return Err(SnapshotError::UnknownOccupant {
                            room: room.id().to_string(),
                            student: occupant.to_string(),
                        });
                    }
                    Some(Some(linked)) if *linked == room.id().as_str() => {}
                    Some(linked) => {
                        return Err(SnapshotError::DanglingOccupant {
                            student: occupant.to_string(),
                            room: room.id().to_string(),
                            linked: linked.unwrap_or("no room").to_string(),
                        });
                    }
                }
            }
        }

        let rooms_by_id: HashMap<&str, &Room> =
            self.rooms.iter().map(|r| (r.id().as_str(), r)).collect();
        for student in &self.students {
            if let Some(room_id) = student.room() {
                let listed = rooms_by_id
                    .get(room_id.as_str())
                    .is_some_and(|room| room.houses(student.id()));
                if !listed {
                    return Err(SnapshotError::InconsistentAssignment {
                        student: student.id().to_string(),
                        room: room_id.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gender::{Gender, RoomGender},
        room::RoomId,
        student::StudentId,
    };
    use std::io::Write;

    fn student(id: &str) -> Student {
        Student::new(StudentId::new(id).unwrap(), id, Gender::Male, "CS", 1).unwrap()
    }

    fn room(id: &str) -> Room {
        Room::new(RoomId::new(id).unwrap(), "B1", "A", 1, "1", 2, RoomGender::Male).unwrap()
    }

    #[test]
    fn test_consistent_snapshot_validates() {
        let s1 = student("s1").with_room(RoomId::new("r1").unwrap());
        let s2 = student("s2");
        let r1 = room("r1")
            .with_occupants(vec![StudentId::new("s1").unwrap()])
            .unwrap();
        assert!(Snapshot::new(vec![s1, s2], vec![r1]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = Snapshot::new(vec![student("s1"), student("s1")], vec![]).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateStudent(id) if id == "s1"));

        let err = Snapshot::new(vec![], vec![room("r1"), room("r1")]).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateRoom(id) if id == "r1"));
    }

    #[test]
    fn test_unknown_occupant_is_rejected() {
        let r1 = room("r1")
            .with_occupants(vec![StudentId::new("ghost").unwrap()])
            .unwrap();
        let err = Snapshot::new(vec![], vec![r1]).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownOccupant { .. }));
    }

    #[test]
    fn test_link_disagreement_is_rejected() {
        // Student claims a room that does not list them.
        let s1 = student("s1").with_room(RoomId::new("r1").unwrap());
        let err = Snapshot::new(vec![s1], vec![room("r1")]).unwrap_err();
        assert!(matches!(err, SnapshotError::InconsistentAssignment { .. }));

        // Room lists a student that has no room link.
        let r1 = room("r1")
            .with_occupants(vec![StudentId::new("s1").unwrap()])
            .unwrap();
        let err = Snapshot::new(vec![student("s1")], vec![r1]).unwrap_err();
        assert!(matches!(err, SnapshotError::DanglingOccupant { .. }));
    }

    #[test]
    fn test_json_file_round_trip() {
        let snapshot = Snapshot::new(vec![student("s1")], vec![room("r1")]).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(snapshot.to_json_string_pretty().unwrap().as_bytes())
            .unwrap();

        let loaded = Snapshot::from_path(file.path()).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_malformed_json_reports_json_error() {
        let err = Snapshot::from_json_str("{\"students\": 3}").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_invalid_record_and_missing_file_classification() {
        let json = r#"{"students":[{"id":"s1","fullName":"A","gender":"X","department":"CS","year":1}]}"#;
        let err = Snapshot::from_json_str(json).unwrap_err();
        assert!(err.is_malformed());

        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(!err.is_malformed());
    }
}
