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

//! Allocation priority ordering.
//!
//! Within a gender partition, students are placed in the following order:
//!
//! 1. Seniors (year > 1) before freshmen (year 1).
//! 2. Seniors by department, then by full name.
//! 3. Freshmen by full name alone.
//!
//! Text compares byte-wise and case-sensitively. The sort is stable, so
//! students with identical keys keep their input order and the result is a
//! pure function of the input sequence.

use crate::error::AllocationError;
use dorm_model::{gender::Gender, student::Student};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Senior,
    Freshman,
}

/// Sort key of a student. Orders by tier, then department (seniors only),
/// then full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriorityKey<'a> {
    tier: Tier,
    department: Option<&'a str>,
    full_name: &'a str,
}

impl<'a> PriorityKey<'a> {
    #[inline(always)]
    fn of(student: &'a Student) -> Self {
        if student.is_senior() {
            Self {
                tier: Tier::Senior,
                department: Some(student.department()),
                full_name: student.full_name(),
            }
        } else {
            Self {
                tier: Tier::Freshman,
                department: None,
                full_name: student.full_name(),
            }
        }
    }
}

impl PartialOrd for PriorityKey<'_> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey<'_> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| self.department.cmp(&other.department))
            .then_with(|| self.full_name.cmp(other.full_name))
    }
}

/// Orders one gender partition into allocation priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrioritySorter;

impl PrioritySorter {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Sorts `students`, all of which must belong to the `gender` partition.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::PartitionMismatch` for the first student whose
    /// gender differs from `gender`; nothing is sorted in that case.
    pub fn sort(
        &self,
        gender: Gender,
        mut students: Vec<Student>,
    ) -> Result<Vec<Student>, AllocationError> {
        if let Some(stray) = students.iter().find(|s| s.gender() != gender) {
            return Err(AllocationError::PartitionMismatch {
                student: stray.id().clone(),
                expected: gender,
                found: stray.gender(),
            });
        }

        // `sort_by` is stable; equal keys keep their input order.
        students.sort_by(|a, b| PriorityKey::of(a).cmp(&PriorityKey::of(b)));
        Ok(students)
    }
}

/// Splits `students` into `(males, females)`, preserving input order within each.
pub fn partition_by_gender(students: Vec<Student>) -> (Vec<Student>, Vec<Student>) {
    students
        .into_iter()
        .partition(|s| s.gender() == Gender::Male)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorm_model::student::StudentId;

    fn student(id: &str, name: &str, gender: Gender, department: &str, year: u32) -> Student {
        Student::new(StudentId::new(id).unwrap(), name, gender, department, year).unwrap()
    }

    fn names(students: &[Student]) -> Vec<&str> {
        students.iter().map(|s| s.full_name()).collect()
    }

    #[test]
    fn test_freshmen_sort_alphabetically() {
        let input = vec![
            student("1", "Dawit", Gender::Male, "CS", 1),
            student("2", "Abel", Gender::Male, "EE", 1),
            student("3", "Chala", Gender::Male, "CS", 1),
            student("4", "Biruk", Gender::Male, "ME", 1),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Male, input).unwrap();
        assert_eq!(names(&sorted), vec!["Abel", "Biruk", "Chala", "Dawit"]);
    }

    #[test]
    fn test_seniors_precede_freshmen() {
        let input = vec![
            student("1", "Aster", Gender::Female, "CS", 1),
            student("2", "Zewditu", Gender::Female, "CS", 2),
            student("3", "Bethlehem", Gender::Female, "Arch", 1),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Female, input).unwrap();
        assert_eq!(names(&sorted), vec!["Zewditu", "Aster", "Bethlehem"]);
    }

    #[test]
    fn test_seniors_group_by_department_then_name() {
        let input = vec![
            student("1", "Zeynu", Gender::Male, "Physics", 3),
            student("2", "Amanuel", Gender::Male, "Physics", 2),
            student("3", "Yonas", Gender::Male, "Biology", 4),
            student("4", "Kebede", Gender::Male, "Biology", 2),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Male, input).unwrap();
        assert_eq!(names(&sorted), vec!["Kebede", "Yonas", "Amanuel", "Zeynu"]);
    }

    #[test]
    fn test_freshman_department_does_not_matter() {
        let input = vec![
            student("1", "Bona", Gender::Male, "Arch", 1),
            student("2", "Abdi", Gender::Male, "Zoology", 1),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Male, input).unwrap();
        assert_eq!(names(&sorted), vec!["Abdi", "Bona"]);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let input = vec![
            student("1", "abel", Gender::Male, "CS", 1),
            student("2", "Zola", Gender::Male, "CS", 1),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Male, input).unwrap();
        // Uppercase letters sort before lowercase ones.
        assert_eq!(names(&sorted), vec!["Zola", "abel"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let input = vec![
            student("b", "Same Name", Gender::Female, "CS", 1),
            student("a", "Same Name", Gender::Female, "CS", 1),
            student("c", "Same Name", Gender::Female, "CS", 1),
        ];
        let sorted = PrioritySorter::new().sort(Gender::Female, input).unwrap();
        let ids: Vec<&str> = sorted.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_wrong_partition_is_rejected() {
        let input = vec![
            student("1", "Abel", Gender::Male, "CS", 1),
            student("2", "Hana", Gender::Female, "CS", 1),
        ];
        let err = PrioritySorter::new().sort(Gender::Male, input).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::PartitionMismatch { ref student, expected: Gender::Male, found: Gender::Female }
                if student.as_str() == "2"
        ));
    }

    #[test]
    fn test_empty_input() {
        let sorted = PrioritySorter::new().sort(Gender::Male, Vec::new()).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_partition_by_gender_preserves_order() {
        let input = vec![
            student("1", "A", Gender::Female, "CS", 1),
            student("2", "B", Gender::Male, "CS", 1),
            student("3", "C", Gender::Female, "CS", 1),
            student("4", "D", Gender::Male, "CS", 1),
        ];
        let (males, females) = partition_by_gender(input);
        assert_eq!(names(&males), vec!["B", "D"]);
        assert_eq!(names(&females), vec!["A", "C"]);
    }
}
