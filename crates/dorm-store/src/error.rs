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

/// Failures of the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A save referred to a student the store does not know.
    #[error("student {0} not found")]
    StudentNotFound(String),

    /// A save referred to a room the store does not know.
    #[error("room {0} not found")]
    RoomNotFound(String),

    /// A room save would house a student whose gender the room does not admit.
    #[error("room {room} does not admit student {student}")]
    GenderViolation { room: String, student: String },

    /// The backend could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns `true` if the failure lies with the backend rather than the data.
    #[inline]
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_classification() {
        let e = StoreError::StudentNotFound("s1".to_string());
        assert_eq!(e.to_string(), "student s1 not found");
        assert!(!e.is_backend_failure());

        let e = StoreError::Unavailable("disk full".to_string());
        assert_eq!(e.to_string(), "store unavailable: disk full");
        assert!(e.is_backend_failure());

        let e = StoreError::GenderViolation {
            room: "r1".to_string(),
            student: "s2".to_string(),
        };
        assert_eq!(e.to_string(), "room r1 does not admit student s2");
    }
}
