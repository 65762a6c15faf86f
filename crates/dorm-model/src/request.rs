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

//! Caller-supplied allocation requests.
//!
//! An `AllocationRequest` narrows the run to a subset of unassigned students
//! (`StudentCriteria`) and a subset of rooms (`RoomScope`). Its JSON shape is
//!
//! ```json
//! { "criteria": { "department": "CS", "year": "2", "gender": "F" },
//!   "targetBuilding": "B1", "targetBlock": "A" }
//! ```
//!
//! where every field is optional. Normalisation is limited to trimming text,
//! treating blank text as absent, accepting the year as either a JSON number
//! or a numeric string, and the gender spellings accepted by `Gender`.
//! Anything else is rejected with a `ModelError`.

use crate::{error::ModelError, gender::Gender, room::Room, student::Student};
use serde::{Deserialize, Deserializer, Serialize};

/// Filters applied to the unassigned-student set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCriteria")]
pub struct StudentCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl StudentCriteria {
    /// Builds criteria from raw, possibly blank, text fields.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidYear` for a year that is not a positive
    /// integer and `ModelError::InvalidGender` for an unrecognised gender.
    pub fn parse(
        department: Option<&str>,
        year: Option<&str>,
        gender: Option<&str>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            department: normalize(department),
            year: normalize(year).as_deref().map(parse_year).transpose()?,
            gender: normalize(gender)
                .as_deref()
                .map(str::parse::<Gender>)
                .transpose()?,
        })
    }

    /// Returns `true` if no filter is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.year.is_none() && self.gender.is_none()
    }

    /// Returns `true` if `student` satisfies every filter that is set.
    pub fn matches(&self, student: &Student) -> bool {
        self.department
            .as_deref()
            .is_none_or(|d| d == student.department())
            && self.year.is_none_or(|y| y == student.year())
            && self.gender.is_none_or(|g| g == student.gender())
    }
}

impl std::fmt::Display for StudentCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "all unassigned students");
        }
        let mut parts = Vec::with_capacity(3);
        if let Some(d) = &self.department {
            parts.push(format!("department={}", d));
        }
        if let Some(y) = self.year {
            parts.push(format!("year={}", y));
        }
        if let Some(g) = self.gender {
            parts.push(format!("gender={}", g.code()));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Restricts the candidate rooms to a building and/or block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomScope {
    #[serde(
        rename = "targetBuilding",
        default,
        deserialize_with = "deserialize_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    pub building: Option<String>,
    #[serde(
        rename = "targetBlock",
        default,
        deserialize_with = "deserialize_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    pub block: Option<String>,
}

impl RoomScope {
    /// Builds a scope from raw, possibly blank, text fields.
    pub fn new(building: Option<&str>, block: Option<&str>) -> Self {
        Self {
            building: normalize(building),
            block: normalize(block),
        }
    }

    /// Returns `true` if neither building nor block is set.
    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.building.is_none() && self.block.is_none()
    }

    /// Returns `true` if `room` lies within this scope.
    pub fn contains(&self, room: &Room) -> bool {
        self.building
            .as_deref()
            .is_none_or(|b| b == room.building())
            && self.block.as_deref().is_none_or(|b| b == room.block())
    }
}

impl std::fmt::Display for RoomScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.building, &self.block) {
            (None, None) => write!(f, "all buildings"),
            (Some(b), None) => write!(f, "building {}", b),
            (None, Some(k)) => write!(f, "block {}", k),
            (Some(b), Some(k)) => write!(f, "building {}, block {}", b, k),
        }
    }
}

/// A single allocation run's input. Constructed by the caller, consumed once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    #[serde(default)]
    pub criteria: StudentCriteria,
    #[serde(flatten)]
    pub scope: RoomScope,
}

impl AllocationRequest {
    #[inline]
    pub fn new(criteria: StudentCriteria, scope: RoomScope) -> Self {
        Self { criteria, scope }
    }

    /// Builds a request from raw text fields, as received from a form or query string.
    ///
    /// # Errors
    ///
    /// See [`StudentCriteria::parse`].
    pub fn parse(
        department: Option<&str>,
        year: Option<&str>,
        gender: Option<&str>,
        target_building: Option<&str>,
        target_block: Option<&str>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            criteria: StudentCriteria::parse(department, year, gender)?,
            scope: RoomScope::new(target_building, target_block),
        })
    }

    /// Parses a request from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error, which wraps any `ModelError` raised
    /// while normalising the fields.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_year(raw: &str) -> Result<u32, ModelError> {
    match raw.trim().parse::<u32>() {
        Ok(year) if year > 0 => Ok(year),
        _ => Err(ModelError::InvalidYear(raw.to_string())),
    }
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize(raw.as_deref()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct RawCriteria {
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    year: Option<RawYear>,
    #[serde(default)]
    gender: Option<String>,
}

impl TryFrom<RawCriteria> for StudentCriteria {
    type Error = ModelError;

    fn try_from(raw: RawCriteria) -> Result<Self, Self::Error> {
        let year = match raw.year {
            None => None,
            Some(RawYear::Number(n)) => Some(
                u32::try_from(n)
                    .ok()
                    .filter(|y| *y > 0)
                    .ok_or_else(|| ModelError::InvalidYear(n.to_string()))?,
            ),
            Some(RawYear::Text(t)) => normalize(Some(t.as_str()))
                .as_deref()
                .map(parse_year)
                .transpose()?,
        };

        Ok(Self {
            department: normalize(raw.department.as_deref()),
            year,
            gender: normalize(raw.gender.as_deref())
                .as_deref()
                .map(str::parse::<Gender>)
                .transpose()?,
        })
    }
}
