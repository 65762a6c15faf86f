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

//! Rooms and their ordering.
//!
//! A `Room` owns its occupant list and a status. The occupant list never grows
//! beyond the capacity: `Room::admit` refuses a student once the room is full,
//! and both the constructor and deserialisation reject over-full rooms.
//!
//! Rooms are walked by the allocation engine in a fixed physical order,
//! captured by `RoomOrderKey`: building, then floor, then room number, where
//! room numbers compare numerically when both sides are plain integers
//! (`"9" < "10"`) and lexically otherwise.

use crate::{error::ModelError, gender::RoomGender, student::StudentId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The unique identifier of a room.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Creates a new `RoomId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyIdentifier` if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyIdentifier { kind: "room" });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.0
    }
}

/// The occupancy status of a room.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum RoomStatus {
    #[default]
    Available,
    Full,
    UnderMaintenance,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "Available"),
            RoomStatus::Full => write!(f, "Full"),
            RoomStatus::UnderMaintenance => write!(f, "Under Maintenance"),
        }
    }
}

/// A dormitory room.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RoomRecord")]
pub struct Room {
    id: RoomId,
    building: String,
    block: String,
    floor: i32,
    number: String,
    capacity: u32,
    gender: RoomGender,
    occupants: Vec<StudentId>,
    status: RoomStatus,
}

impl Room {
    /// Creates a new, empty and available `Room`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidCapacity` if `capacity` is zero.
    pub fn new(
        id: RoomId,
        building: impl Into<String>,
        block: impl Into<String>,
        floor: i32,
        number: impl Into<String>,
        capacity: u32,
        gender: RoomGender,
    ) -> Result<Self, ModelError> {
        if capacity == 0 {
            return Err(ModelError::InvalidCapacity {
                room: id.to_string(),
            });
        }

        Ok(Self {
            id,
            building: building.into(),
            block: block.into(),
            floor,
            number: number.into(),
            capacity,
            gender,
            occupants: Vec::new(),
            status: RoomStatus::Available,
        })
    }

    /// Returns this room holding `occupants`, with its status derived from occupancy.
    ///
    /// # Errors
    ///
    /// Returns an error if the list exceeds the capacity or repeats a student.
    pub fn with_occupants(mut self, occupants: Vec<StudentId>) -> Result<Self, ModelError> {
        for (i, student) in occupants.iter().enumerate() {
            if occupants[..i].contains(student) {
                return Err(ModelError::DuplicateOccupant {
                    room: self.id.to_string(),
                    student: student.to_string(),
                });
            }
        }

        if occupants.len() > self.capacity as usize {
            return Err(ModelError::OccupancyExceedsCapacity {
                room: self.id.to_string(),
                occupants: occupants.len(),
                capacity: self.capacity,
            });
        }

        self.occupants = occupants;
        self.refresh_status();
        Ok(self)
    }

    /// Returns this room with an explicit status, overriding the derived one.
    #[inline]
    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    #[inline]
    pub fn building(&self) -> &str {
        &self.building
    }

    #[inline]
    pub fn block(&self) -> &str {
        &self.block
    }

    #[inline]
    pub fn floor(&self) -> i32 {
        self.floor
    }

    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn gender(&self) -> RoomGender {
        self.gender
    }

    #[inline]
    pub fn occupants(&self) -> &[StudentId] {
        &self.occupants
    }

    #[inline]
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// Number of free beds; zero for a full room.
    #[inline]
    pub fn vacancies(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.occupants.len())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.vacancies() == 0
    }

    #[inline]
    pub fn is_under_maintenance(&self) -> bool {
        self.status == RoomStatus::UnderMaintenance
    }

    /// Returns `true` if `student` is listed as an occupant.
    #[inline]
    pub fn houses(&self, student: &StudentId) -> bool {
        self.occupants.contains(student)
    }

    /// Appends `student` to the occupant list.
    ///
    /// The status is left untouched; call [`Room::refresh_status`] once a
    /// batch of admissions is complete.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::OccupancyExceedsCapacity` if the room is already full.
    pub fn admit(&mut self, student: StudentId) -> Result<(), ModelError> {
        if self.is_full() {
            return Err(ModelError::OccupancyExceedsCapacity {
                room: self.id.to_string(),
                occupants: self.occupants.len() + 1,
                capacity: self.capacity,
            });
        }
        self.occupants.push(student);
        Ok(())
    }

    /// Recomputes the status from current occupancy: `Full` at capacity, otherwise `Available`.
    #[inline]
    pub fn refresh_status(&mut self) {
        self.status = if self.is_full() {
            RoomStatus::Full
        } else {
            RoomStatus::Available
        };
    }

    /// Human-readable label used in placement reports: `"{building}-{block}-{number}"`.
    pub fn label(&self) -> String {
        format!("{}-{}-{}", self.building, self.block, self.number)
    }

    /// Returns the key that places this room in walk order.
    #[inline]
    pub fn order_key(&self) -> RoomOrderKey<'_> {
        RoomOrderKey {
            building: &self.building,
            floor: self.floor,
            number: &self.number,
        }
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}/{} {}",
            self.label(),
            self.gender,
            self.occupants.len(),
            self.capacity,
            self.status
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomRecord {
    id: RoomId,
    building: String,
    block: String,
    floor: i32,
    number: String,
    capacity: u32,
    gender: RoomGender,
    #[serde(default)]
    occupants: Vec<StudentId>,
    #[serde(default)]
    status: Option<RoomStatus>,
}

impl TryFrom<RoomRecord> for Room {
    type Error = ModelError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let room = Room::new(
            record.id,
            record.building,
            record.block,
            record.floor,
            record.number,
            record.capacity,
            record.gender,
        )?
        .with_occupants(record.occupants)?;

        Ok(match record.status {
            Some(status) => room.with_status(status),
            None => room,
        })
    }
}

/// The walk-order key of a room: `(building, floor, number)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoomOrderKey<'a> {
    building: &'a str,
    floor: i32,
    number: &'a str,
}

impl PartialOrd for RoomOrderKey<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoomOrderKey<'_> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.building
            .cmp(other.building)
            .then_with(|| self.floor.cmp(&other.floor))
            .then_with(|| compare_room_numbers(self.number, other.number))
    }
}

/// Compares two room numbers.
///
/// Two plain integers compare by value, ties (`"07"` vs `"7"`) falling back to
/// text. A plain integer sorts before anything that is not one. Everything
/// else compares lexically. The result is a total order.
pub fn compare_room_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, building: &str, floor: i32, number: &str, capacity: u32) -> Room {
        Room::new(
            RoomId::new(id).unwrap(),
            building,
            "A",
            floor,
            number,
            capacity,
            RoomGender::Male,
        )
        .unwrap()
    }

    fn sid(id: &str) -> StudentId {
        StudentId::new(id).unwrap()
    }

    #[test]
    fn test_new_room_is_empty_and_available() {
        let r = room("r1", "B1", 0, "101", 3);
        assert_eq!(r.capacity(), 3);
        assert_eq!(r.vacancies(), 3);
        assert!(r.occupants().is_empty());
        assert_eq!(r.status(), RoomStatus::Available);
        assert_eq!(r.label(), "B1-A-101");
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = Room::new(
            RoomId::new("r0").unwrap(),
            "B1",
            "A",
            1,
            "1",
            0,
            RoomGender::Female,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidCapacity {
                room: "r0".to_string()
            }
        );
    }

    #[test]
    fn test_admit_until_full() {
        let mut r = room("r1", "B1", 0, "101", 2);
        r.admit(sid("a")).unwrap();
        r.admit(sid("b")).unwrap();
        assert!(r.is_full());
        assert!(r.admit(sid("c")).is_err());
        assert_eq!(r.occupants().len(), 2);

        // admit leaves the status for the caller to refresh
        assert_eq!(r.status(), RoomStatus::Available);
        r.refresh_status();
        assert_eq!(r.status(), RoomStatus::Full);
    }

    #[test]
    fn test_stale_full_status_refreshes_from_occupancy() {
        let mut r = room("r1", "B1", 0, "101", 2)
            .with_occupants(vec![sid("a")])
            .unwrap()
            .with_status(RoomStatus::Full);
        assert!(r.houses(&sid("a")));
        assert_eq!(r.vacancies(), 1);
        r.refresh_status();
        assert_eq!(r.status(), RoomStatus::Available);
    }

    #[test]
    fn test_with_occupants_validates() {
        let over = room("r1", "B1", 0, "101", 1).with_occupants(vec![sid("a"), sid("b")]);
        assert!(matches!(
            over,
            Err(ModelError::OccupancyExceedsCapacity { occupants: 2, capacity: 1, .. })
        ));

        let dup = room("r1", "B1", 0, "101", 3).with_occupants(vec![sid("a"), sid("a")]);
        assert!(matches!(dup, Err(ModelError::DuplicateOccupant { .. })));
    }

    #[test]
    fn test_room_number_comparison() {
        assert_eq!(compare_room_numbers("9", "10"), Ordering::Less);
        assert_eq!(compare_room_numbers("10", "9"), Ordering::Greater);
        assert_eq!(compare_room_numbers("101", "101"), Ordering::Equal);
        assert_eq!(compare_room_numbers("07", "7"), Ordering::Less);
        assert_eq!(compare_room_numbers("12", "12B"), Ordering::Less);
        assert_eq!(compare_room_numbers("A2", "A10"), Ordering::Greater);
    }

    #[test]
    fn test_order_key_sorts_building_floor_number() {
        let mut rooms = vec![
            room("r1", "B2", 0, "1", 2),
            room("r2", "B1", 1, "10", 2),
            room("r3", "B1", 1, "9", 2),
            room("r4", "B1", 0, "200", 2),
        ];
        rooms.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        let ids: Vec<&str> = rooms.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["r4", "r3", "r2", "r1"]);
    }

    #[test]
    fn test_deserialize_derives_status_unless_given() {
        let json = r#"{"id":"r1","building":"B1","block":"A","floor":2,"number":"201",
                       "capacity":2,"gender":"F","occupants":["s1","s2"]}"#;
        let r: Room = serde_json::from_str(json).unwrap();
        assert_eq!(r.status(), RoomStatus::Full);

        let json = r#"{"id":"r1","building":"B1","block":"A","floor":2,"number":"201",
                       "capacity":2,"gender":"F","status":"UnderMaintenance"}"#;
        let r: Room = serde_json::from_str(json).unwrap();
        assert!(r.is_under_maintenance());

        let over = r#"{"id":"r1","building":"B1","block":"A","floor":2,"number":"201",
                       "capacity":1,"gender":"F","occupants":["s1","s2"]}"#;
        assert!(serde_json::from_str::<Room>(over).is_err());
    }

    #[test]
    fn test_display_summarises_occupancy() {
        let r = room("r1", "B1", 0, "101", 3)
            .with_occupants(vec![sid("a")])
            .unwrap();
        assert_eq!(format!("{}", r), "B1-A-101 [male] 1/3 Available");
    }
}
