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

//! Results of an allocation run.
//!
//! The filler produces one `PartitionOutcome` per gender; the engine folds
//! the two into an `AllocationOutcome`, which keeps placements in the order
//! they were made (males first, then females) alongside every student that
//! could not be placed and the reason why. `AllocationResponse` is the JSON
//! shape handed back to request handlers.

use crate::stats::AllocationStatistics;
use dorm_model::{
    gender::Gender,
    placement::Placement,
    student::{Student, StudentId},
};
use serde::{Deserialize, Serialize};

/// Why a student was left without a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnplacedReason {
    /// The partition had no candidate room at all (none matching the gender
    /// and scope, or all under maintenance).
    NoRoomsAvailable,
    /// Candidate rooms existed but every bed was taken before this student's turn.
    CapacityExhausted,
}

impl std::fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnplacedReason::NoRoomsAvailable => write!(f, "no rooms available"),
            UnplacedReason::CapacityExhausted => write!(f, "capacity exhausted"),
        }
    }
}

/// A student left unallocated at the end of a run. The student record itself
/// is not modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplacedStudent {
    pub student_id: StudentId,
    pub full_name: String,
    pub gender: Gender,
    pub year: u32,
    pub department: String,
    pub reason: UnplacedReason,
}

impl UnplacedStudent {
    pub fn new(student: &Student, reason: UnplacedReason) -> Self {
        Self {
            student_id: student.id().clone(),
            full_name: student.full_name().to_string(),
            gender: student.gender(),
            year: student.year(),
            department: student.department().to_string(),
            reason,
        }
    }
}

/// Per-partition counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionSummary {
    pub gender: Gender,
    pub students: usize,
    pub allocated: usize,
    pub unallocated: usize,
    pub rooms_considered: usize,
    pub rooms_touched: usize,
    pub rooms_filled: usize,
}

impl PartitionSummary {
    /// A partition in which nothing happened.
    #[inline]
    pub fn empty(gender: Gender) -> Self {
        Self {
            gender,
            students: 0,
            allocated: 0,
            unallocated: 0,
            rooms_considered: 0,
            rooms_touched: 0,
            rooms_filled: 0,
        }
    }
}

impl std::fmt::Display for PartitionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} of {} placed, {} unplaced ({} rooms considered, {} touched, {} filled)",
            self.gender,
            self.allocated,
            self.students,
            self.unallocated,
            self.rooms_considered,
            self.rooms_touched,
            self.rooms_filled
        )
    }
}

/// Everything one gender partition produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutcome {
    pub gender: Gender,
    pub placements: Vec<Placement>,
    pub unplaced: Vec<UnplacedStudent>,
    pub rooms_considered: usize,
    pub rooms_touched: usize,
    pub rooms_filled: usize,
}

impl PartitionOutcome {
    /// An outcome with no students and no rooms.
    #[inline]
    pub fn empty(gender: Gender) -> Self {
        Self {
            gender,
            placements: Vec::new(),
            unplaced: Vec::new(),
            rooms_considered: 0,
            rooms_touched: 0,
            rooms_filled: 0,
        }
    }

    #[inline]
    pub fn allocated(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn unallocated(&self) -> usize {
        self.unplaced.len()
    }

    pub fn summary(&self) -> PartitionSummary {
        PartitionSummary {
            gender: self.gender,
            students: self.allocated() + self.unallocated(),
            allocated: self.allocated(),
            unallocated: self.unallocated(),
            rooms_considered: self.rooms_considered,
            rooms_touched: self.rooms_touched,
            rooms_filled: self.rooms_filled,
        }
    }
}

/// The aggregate result of an allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    males: PartitionSummary,
    females: PartitionSummary,
    placements: Vec<Placement>,
    unplaced: Vec<UnplacedStudent>,
    statistics: AllocationStatistics,
}

impl AllocationOutcome {
    /// Folds the male and female partition outcomes, males first.
    ///
    /// # Panics
    ///
    /// Panics if the partitions are passed in the wrong order.
    pub(crate) fn from_partitions(
        males: PartitionOutcome,
        females: PartitionOutcome,
        statistics: AllocationStatistics,
    ) -> Self {
        assert!(
            males.gender == Gender::Male && females.gender == Gender::Female,
            "called `AllocationOutcome::from_partitions` with partitions out of order: got {} then {}",
            males.gender,
            females.gender
        );

        let males_summary = males.summary();
        let females_summary = females.summary();

        let mut placements = males.placements;
        placements.extend(females.placements);
        let mut unplaced = males.unplaced;
        unplaced.extend(females.unplaced);

        Self {
            males: males_summary,
            females: females_summary,
            placements,
            unplaced,
            statistics,
        }
    }

    /// The outcome of a run that matched no students.
    pub fn empty(statistics: AllocationStatistics) -> Self {
        Self::from_partitions(
            PartitionOutcome::empty(Gender::Male),
            PartitionOutcome::empty(Gender::Female),
            statistics,
        )
    }

    #[inline]
    pub fn allocated(&self) -> usize {
        self.males.allocated + self.females.allocated
    }

    #[inline]
    pub fn unallocated(&self) -> usize {
        self.males.unallocated + self.females.unallocated
    }

    #[inline]
    pub fn partition(&self, gender: Gender) -> &PartitionSummary {
        match gender {
            Gender::Male => &self.males,
            Gender::Female => &self.females,
        }
    }

    /// Placements in the order they were made.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Students left without a room, in priority order per partition.
    #[inline]
    pub fn unplaced(&self) -> &[UnplacedStudent] {
        &self.unplaced
    }

    #[inline]
    pub fn statistics(&self) -> &AllocationStatistics {
        &self.statistics
    }

    /// Returns the JSON response shape for request handlers.
    pub fn response(&self) -> AllocationResponse {
        AllocationResponse {
            allocated: self.allocated(),
            unallocated: self.unallocated(),
            details: AllocationDetails {
                males_allocated: self.males.allocated,
                females_allocated: self.females.allocated,
                unallocated_males: self.males.unallocated,
                unallocated_females: self.females.unallocated,
                allocations: self.placements.iter().map(AllocationRecord::from).collect(),
                unplaced: self.unplaced.iter().map(UnplacedRecord::from).collect(),
            },
        }
    }
}

impl std::fmt::Display for AllocationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Summary")?;
        writeln!(f, "   Allocated: {}", self.allocated())?;
        writeln!(f, "   Unallocated: {}", self.unallocated())?;
        writeln!(f, "   {}", self.males)?;
        writeln!(f, "   {}", self.females)?;
        writeln!(f)?;

        if self.placements.is_empty() {
            writeln!(f, "   (No students placed)")?;
        } else {
            writeln!(
                f,
                "   {:<12} | {:<24} | {:<12} | {:<4} | {:<16}",
                "Student", "Name", "Department", "Year", "Room"
            )?;
            writeln!(f, "   {:-<12}-+-{:-<24}-+-{:-<12}-+-{:-<4}-+-{:-<16}", "", "", "", "", "")?;
            for p in &self.placements {
                writeln!(
                    f,
                    "   {:<12} | {:<24} | {:<12} | {:<4} | {:<16}",
                    p.student_id(),
                    p.full_name(),
                    p.department(),
                    p.year(),
                    p.room_label()
                )?;
            }
        }

        if !self.unplaced.is_empty() {
            writeln!(f)?;
            writeln!(f, "   Unplaced:")?;
            for u in &self.unplaced {
                writeln!(f, "   {:<12} | {:<24} | {}", u.student_id, u.full_name, u.reason)?;
            }
        }

        Ok(())
    }
}

/// Response body of an allocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub allocated: usize,
    pub unallocated: usize,
    pub details: AllocationDetails,
}

/// Per-gender breakdown and placement list of an `AllocationResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationDetails {
    pub males_allocated: usize,
    pub females_allocated: usize,
    pub unallocated_males: usize,
    pub unallocated_females: usize,
    pub allocations: Vec<AllocationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<UnplacedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub student_id: String,
    pub full_name: String,
    pub room: String,
    pub year: u32,
    pub department: String,
}

impl From<&Placement> for AllocationRecord {
    fn from(p: &Placement) -> Self {
        Self {
            student_id: p.student_id().to_string(),
            full_name: p.full_name().to_string(),
            room: p.room_label().to_string(),
            year: p.year(),
            department: p.department().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedRecord {
    pub student_id: String,
    pub full_name: String,
    pub gender: Gender,
    pub reason: UnplacedReason,
}

impl From<&UnplacedStudent> for UnplacedRecord {
    fn from(u: &UnplacedStudent) -> Self {
        Self {
            student_id: u.student_id.to_string(),
            full_name: u.full_name.clone(),
            gender: u.gender,
            reason: u.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AllocationStatisticsBuilder;
    use dorm_model::{
        gender::RoomGender,
        room::{Room, RoomId},
    };

    fn student(id: &str, gender: Gender) -> Student {
        Student::new(StudentId::new(id).unwrap(), id.to_uppercase(), gender, "CS", 1).unwrap()
    }

    fn room(id: &str, gender: RoomGender) -> Room {
        Room::new(RoomId::new(id).unwrap(), "B1", "A", 1, "101", 2, gender).unwrap()
    }

    fn partition(gender: Gender, placed: &[&str], unplaced: &[&str]) -> PartitionOutcome {
        let r = room("r", RoomGender::from(gender));
        PartitionOutcome {
            gender,
            placements: placed
                .iter()
                .map(|id| Placement::new(&student(id, gender), &r))
                .collect(),
            unplaced: unplaced
                .iter()
                .map(|id| UnplacedStudent::new(&student(id, gender), UnplacedReason::CapacityExhausted))
                .collect(),
            rooms_considered: 1,
            rooms_touched: usize::from(!placed.is_empty()),
            rooms_filled: 0,
        }
    }

    #[test]
    fn test_from_partitions_keeps_males_first() {
        let outcome = AllocationOutcome::from_partitions(
            partition(Gender::Male, &["m1", "m2"], &["m3"]),
            partition(Gender::Female, &["f1"], &[]),
            AllocationStatisticsBuilder::new().build(),
        );

        assert_eq!(outcome.allocated(), 3);
        assert_eq!(outcome.unallocated(), 1);
        let ids: Vec<&str> = outcome
            .placements()
            .iter()
            .map(|p| p.student_id().as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "f1"]);
        assert_eq!(outcome.partition(Gender::Male).students, 3);
        assert_eq!(outcome.partition(Gender::Female).unallocated, 0);
    }

    #[test]
    #[should_panic(expected = "partitions out of order")]
    fn test_from_partitions_rejects_swapped_order() {
        let _ = AllocationOutcome::from_partitions(
            PartitionOutcome::empty(Gender::Female),
            PartitionOutcome::empty(Gender::Male),
            AllocationStatisticsBuilder::new().build(),
        );
    }

    #[test]
    fn test_response_json_shape() {
        let outcome = AllocationOutcome::from_partitions(
            partition(Gender::Male, &["m1"], &[]),
            partition(Gender::Female, &[], &["f1"]),
            AllocationStatisticsBuilder::new().build(),
        );

        let json = serde_json::to_value(outcome.response()).unwrap();
        assert_eq!(json["allocated"], 1);
        assert_eq!(json["unallocated"], 1);
        assert_eq!(json["details"]["malesAllocated"], 1);
        assert_eq!(json["details"]["femalesAllocated"], 0);
        assert_eq!(json["details"]["unallocatedMales"], 0);
        assert_eq!(json["details"]["unallocatedFemales"], 1);

        let record = &json["details"]["allocations"][0];
        assert_eq!(record["studentId"], "m1");
        assert_eq!(record["fullName"], "M1");
        assert_eq!(record["room"], "B1-A-101");
        assert_eq!(record["year"], 1);
        assert_eq!(record["department"], "CS");

        let unplaced = &json["details"]["unplaced"][0];
        assert_eq!(unplaced["studentId"], "f1");
        assert_eq!(unplaced["gender"], "F");
        assert_eq!(unplaced["reason"], "CapacityExhausted");
    }

    #[test]
    fn test_empty_response_omits_unplaced() {
        let outcome = AllocationOutcome::empty(AllocationStatisticsBuilder::new().build());
        let json = serde_json::to_string(&outcome.response()).unwrap();
        assert_eq!(
            json,
            r#"{"allocated":0,"unallocated":0,"details":{"malesAllocated":0,"femalesAllocated":0,"unallocatedMales":0,"unallocatedFemales":0,"allocations":[]}}"#
        );
    }

    #[test]
    fn test_display_report() {
        let outcome = AllocationOutcome::from_partitions(
            partition(Gender::Male, &["m1"], &["m2"]),
            PartitionOutcome::empty(Gender::Female),
            AllocationStatisticsBuilder::new().build(),
        );
        let rendered = outcome.to_string();
        assert!(rendered.starts_with("Allocation Summary\n"));
        assert!(rendered.contains("   Allocated: 1\n"));
        assert!(rendered.contains("male: 1 of 2 placed, 1 unplaced"));
        assert!(rendered.contains("B1-A-101"));
        assert!(rendered.contains("capacity exhausted"));

        let empty = AllocationOutcome::empty(AllocationStatisticsBuilder::new().build());
        assert!(empty.to_string().contains("(No students placed)"));
    }
}
