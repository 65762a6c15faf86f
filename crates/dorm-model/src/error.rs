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

/// Validation failures for domain records.
///
/// Every variant describes a record that must not reach the allocation engine.
/// Callers surface these as client errors; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A gender code that is neither male nor female (or co-ed, for rooms).
    #[error("unrecognized gender '{0}'")]
    InvalidGender(String),

    /// A year of study that is not a positive integer.
    #[error("year of study must be a positive integer, got '{0}'")]
    InvalidYear(String),

    /// An identifier that is empty after trimming.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Which kind of record carried the identifier ("student" or "room").
        kind: &'static str,
    },

    /// A room declared with a capacity of zero.
    #[error("room {room} must have a positive capacity")]
    InvalidCapacity {
        /// The offending room.
        room: String,
    },

    /// A room that lists more occupants than it has beds.
    #[error("room {room} holds {occupants} occupants but has capacity {capacity}")]
    OccupancyExceedsCapacity {
        /// The offending room.
        room: String,
        /// Number of listed occupants.
        occupants: usize,
        /// Declared capacity.
        capacity: u32,
    },

    /// A room that lists the same student twice.
    #[error("student {student} is listed more than once in room {room}")]
    DuplicateOccupant {
        /// The offending room.
        room: String,
        /// The repeated student id.
        student: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_carry_context() {
        let e = ModelError::InvalidGender("x".to_string());
        assert_eq!(e.to_string(), "unrecognized gender 'x'");

        let e = ModelError::InvalidYear("two".to_string());
        assert!(e.to_string().contains("'two'"));

        let e = ModelError::EmptyIdentifier { kind: "room" };
        assert_eq!(e.to_string(), "room identifier must not be empty");

        let e = ModelError::OccupancyExceedsCapacity {
            room: "A-1-101".to_string(),
            occupants: 3,
            capacity: 2,
        };
        assert!(e.to_string().contains("A-1-101"));
        assert!(e.to_string().contains("3 occupants"));
        assert!(e.to_string().contains("capacity 2"));
    }
}
