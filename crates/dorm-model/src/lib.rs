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

//! # Dorm Model
//!
//! **Typed domain records for the dormitory room-allocation engine.**
//!
//! This crate is the data interchange layer between the outer system (record
//! stores, request handlers) and the allocation engine in `dorm_alloc`. Every
//! value that crosses into the engine is validated here, at the boundary, so
//! the engine never has to second-guess a gender code or a year of study.
//!
//! ## Modules
//!
//! * **`index`**: Strongly-typed positions (`StudentIndex`, `RoomIndex`) into a snapshot.
//! * **`gender`**: `Gender` for students and `RoomGender` (M/F/Co-ed) for rooms, with normalising parsers.
//! * **`student`** / **`room`**: The `Student` and `Room` records, their ids, and the room ordering key.
//! * **`request`**: Caller-supplied filter criteria and target scope.
//! * **`placement`**: A single student-to-room outcome of an allocation run.
//! * **`snapshot`**: A JSON-serialisable set of students and rooms with referential checks.
//! * **`error`**: `ModelError`, raised whenever a record fails validation.
//!
//! ## Design Philosophy
//!
//! 1.  **Validate at the boundary**: Constructors and `serde` conversions reject malformed
//!     records eagerly, so downstream code works with total, well-formed values.
//! 2.  **Closed enums over strings**: Genders and room statuses are enums; free-form text
//!     is only ever normalised, never guessed.

pub mod error;
pub mod gender;
pub mod index;
pub mod placement;
pub mod request;
pub mod room;
pub mod snapshot;
pub mod student;
