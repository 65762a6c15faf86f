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

//! Student and room gender.
//!
//! Students carry a binary `Gender`; rooms carry a `RoomGender` that may also
//! be co-ed. Both parse from loosely formatted text (`"m"`, `" Female "`, ...)
//! through `FromStr`, which is the only normalisation the system performs.
//! Both serialise as their single-letter codes (`"M"`, `"F"`, `"C"`).

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The gender of a student, used to pick the allocation partition.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Both genders in partition order: males are allocated first.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Returns the single-letter wire code.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(ModelError::InvalidGender(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for &'static str {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

/// The gender designation of a room.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum RoomGender {
    Male,
    Female,
    Coed,
}

impl RoomGender {
    /// Returns the single-letter wire code.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            RoomGender::Male => "M",
            RoomGender::Female => "F",
            RoomGender::Coed => "C",
        }
    }

    /// Returns `true` if a student of `gender` may live in this room.
    ///
    /// Co-ed rooms admit everyone. This is the general housing rule; the
    /// allocation engine is stricter and only fills rooms for which
    /// [`RoomGender::is_exactly`] holds.
    #[inline]
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            RoomGender::Coed => true,
            _ => self.is_exactly(gender),
        }
    }

    /// Returns `true` if this room is designated for exactly `gender`.
    #[inline]
    pub fn is_exactly(&self, gender: Gender) -> bool {
        *self == RoomGender::from(gender)
    }
}

impl From<Gender> for RoomGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => RoomGender::Male,
            Gender::Female => RoomGender::Female,
        }
    }
}

impl std::fmt::Display for RoomGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomGender::Male => write!(f, "male"),
            RoomGender::Female => write!(f, "female"),
            RoomGender::Coed => write!(f, "co-ed"),
        }
    }
}

impl FromStr for RoomGender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "coed" | "co-ed" | "mixed" => Ok(RoomGender::Coed),
            _ => s.parse::<Gender>().map(RoomGender::from),
        }
    }
}

impl TryFrom<String> for RoomGender {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoomGender> for &'static str {
    fn from(gender: RoomGender) -> Self {
        gender.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing_normalises_case_and_whitespace() {
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" male ".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_gender_parsing_rejects_unknown_codes() {
        assert_eq!(
            "x".parse::<Gender>(),
            Err(ModelError::InvalidGender("x".to_string()))
        );
        assert!("".parse::<Gender>().is_err());
        // Co-ed is a room designation, never a student gender.
        assert!("coed".parse::<Gender>().is_err());
    }

    #[test]
    fn test_room_gender_parsing() {
        assert_eq!("co-ed".parse::<RoomGender>().unwrap(), RoomGender::Coed);
        assert_eq!("C".parse::<RoomGender>().unwrap(), RoomGender::Coed);
        assert_eq!("m".parse::<RoomGender>().unwrap(), RoomGender::Male);
        assert_eq!("Female".parse::<RoomGender>().unwrap(), RoomGender::Female);
        assert!("both".parse::<RoomGender>().is_err());
    }

    #[test]
    fn test_admits_versus_is_exactly() {
        assert!(RoomGender::Male.admits(Gender::Male));
        assert!(!RoomGender::Male.admits(Gender::Female));
        assert!(RoomGender::Coed.admits(Gender::Female));

        assert!(RoomGender::Female.is_exactly(Gender::Female));
        assert!(!RoomGender::Coed.is_exactly(Gender::Male));
        assert!(!RoomGender::Coed.is_exactly(Gender::Female));
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"F\"");
        assert_eq!(serde_json::to_string(&RoomGender::Coed).unwrap(), "\"C\"");

        let g: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(g, Gender::Male);

        assert!(serde_json::from_str::<Gender>("\"?\"").is_err());
    }

    #[test]
    fn test_partition_order_is_males_first() {
        assert_eq!(Gender::ALL, [Gender::Male, Gender::Female]);
    }
}
