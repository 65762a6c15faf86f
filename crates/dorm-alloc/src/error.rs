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

use dorm_model::{error::ModelError, gender::Gender, room::RoomId, student::StudentId};
use dorm_store::error::StoreError;

/// The store operation that was in flight when a persistence failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    QueryStudents,
    QueryRooms,
    SaveStudent,
    SaveRoom,
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOperation::QueryStudents => write!(f, "query unassigned students"),
            StoreOperation::QueryRooms => write!(f, "query available rooms"),
            StoreOperation::SaveStudent => write!(f, "save student"),
            StoreOperation::SaveRoom => write!(f, "save room"),
        }
    }
}

/// Failures of an allocation run.
///
/// Skipping a full room or running out of students is ordinary control flow
/// and never produces an error; neither does a request that matches no
/// students.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// A malformed request or record reached the engine.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ModelError),

    /// A student was handed to the sorter of the other gender partition.
    #[error("invalid input: student {student} is {found} but was sorted into the {expected} partition")]
    PartitionMismatch {
        student: StudentId,
        expected: Gender,
        found: Gender,
    },

    /// A store operation failed. Every placement saved before the failure
    /// stays committed; nothing after it was attempted.
    #[error(
        "failed to {operation} (student: {}, room: {}): {source}",
        .student.as_ref().map_or("-", |s| s.as_str()),
        .room.as_ref().map_or("-", |r| r.as_str())
    )]
    Persistence {
        operation: StoreOperation,
        student: Option<StudentId>,
        room: Option<RoomId>,
        #[source]
        source: StoreError,
    },
}

impl AllocationError {
    /// Creates a persistence error carrying the record context of the failed call.
    #[inline]
    pub fn persistence(
        operation: StoreOperation,
        student: Option<&StudentId>,
        room: Option<&RoomId>,
        source: StoreError,
    ) -> Self {
        Self::Persistence {
            operation,
            student: student.cloned(),
            room: room.cloned(),
            source,
        }
    }

    /// Returns `true` if the caller sent something malformed.
    #[inline]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::PartitionMismatch { .. })
    }

    /// The student being processed when the error occurred, if known.
    pub fn student(&self) -> Option<&StudentId> {
        match self {
            Self::PartitionMismatch { student, .. } => Some(student),
            Self::Persistence { student, .. } => student.as_ref(),
            Self::InvalidInput(_) => None,
        }
    }

    /// The room being processed when the error occurred, if known.
    pub fn room(&self) -> Option<&RoomId> {
        match self {
            Self::Persistence { room, .. } => room.as_ref(),
            _ => None,
        }
    }
}
