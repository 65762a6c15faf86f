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

/// Statistics collected during an allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatistics {
    /// Unassigned students that matched the request criteria.
    pub students_considered: usize,
    /// Candidate rooms returned by the store, over both partitions.
    pub rooms_considered: usize,
    /// Rooms that received at least one student.
    pub rooms_touched: usize,
    /// Rooms that reached capacity during the run.
    pub rooms_filled: usize,
    /// Successful student saves.
    pub students_saved: usize,
    /// Successful room saves.
    pub rooms_saved: usize,
    /// Wall-clock duration of the run.
    pub duration: std::time::Duration,
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Statistics:")?;
        writeln!(f, "  Students Considered: {}", self.students_considered)?;
        writeln!(f, "  Rooms Considered: {}", self.rooms_considered)?;
        writeln!(f, "  Rooms Touched: {}", self.rooms_touched)?;
        writeln!(f, "  Rooms Filled: {}", self.rooms_filled)?;
        writeln!(f, "  Students Saved: {}", self.students_saved)?;
        writeln!(f, "  Rooms Saved: {}", self.rooms_saved)?;
        writeln!(f, "  Duration (ms): {:.3}", self.duration.as_secs_f64() * 1000.0)
    }
}

/// Builder for `AllocationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatisticsBuilder {
    students_considered: usize,
    rooms_considered: usize,
    rooms_touched: usize,
    rooms_filled: usize,
    students_saved: usize,
    rooms_saved: usize,
    duration: std::time::Duration,
}

impl Default for AllocationStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            students_considered: 0,
            rooms_considered: 0,
            rooms_touched: 0,
            rooms_filled: 0,
            students_saved: 0,
            rooms_saved: 0,
            duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn students_considered(mut self, students_considered: usize) -> Self {
        self.students_considered = students_considered;
        self
    }

    #[inline]
    pub fn rooms_considered(mut self, rooms_considered: usize) -> Self {
        self.rooms_considered = rooms_considered;
        self
    }

    #[inline]
    pub fn rooms_touched(mut self, rooms_touched: usize) -> Self {
        self.rooms_touched = rooms_touched;
        self
    }

    #[inline]
    pub fn rooms_filled(mut self, rooms_filled: usize) -> Self {
        self.rooms_filled = rooms_filled;
        self
    }

    #[inline]
    pub fn students_saved(mut self, students_saved: usize) -> Self {
        self.students_saved = students_saved;
        self
    }

    #[inline]
    pub fn rooms_saved(mut self, rooms_saved: usize) -> Self {
        self.rooms_saved = rooms_saved;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn build(self) -> AllocationStatistics {
        AllocationStatistics {
            students_considered: self.students_considered,
            rooms_considered: self.rooms_considered,
            rooms_touched: self.rooms_touched,
            rooms_filled: self.rooms_filled,
            students_saved: self.students_saved,
            rooms_saved: self.rooms_saved,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_sets_every_field() {
        let stats = AllocationStatisticsBuilder::new()
            .students_considered(12)
            .rooms_considered(5)
            .rooms_touched(4)
            .rooms_filled(3)
            .students_saved(11)
            .rooms_saved(4)
            .duration(Duration::from_millis(7))
            .build();

        assert_eq!(stats.students_considered, 12);
        assert_eq!(stats.rooms_considered, 5);
        assert_eq!(stats.rooms_touched, 4);
        assert_eq!(stats.rooms_filled, 3);
        assert_eq!(stats.students_saved, 11);
        assert_eq!(stats.rooms_saved, 4);
        assert_eq!(stats.duration, Duration::from_millis(7));
    }

    #[test]
    fn test_display() {
        let stats = AllocationStatisticsBuilder::new()
            .students_considered(3)
            .duration(Duration::from_micros(1500))
            .build();
        let rendered = stats.to_string();

        assert!(rendered.contains("Allocation Statistics:"));
        assert!(rendered.contains("Students Considered: 3"));
        assert!(rendered.contains("Rooms Saved: 0"));
        assert!(rendered.contains("Duration (ms): 1.500"));
    }
}
