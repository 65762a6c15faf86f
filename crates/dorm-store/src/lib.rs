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

//! # Dorm Store
//!
//! The storage collaborator of the allocation engine.
//!
//! The engine never talks to a database directly. It reads a snapshot of
//! unassigned students and candidate rooms, and writes back individual student
//! and room records, all through the `AllocationStore` trait. This crate
//! defines that trait, its error type, and `InMemoryStore`, a complete
//! reference implementation backed by a `Snapshot`.
//!
//! ## Modules
//!
//! - `store`: The `AllocationStore` trait (query unassigned students, query
//!   available rooms, save a student, save a room).
//! - `error`: `StoreError`, the failure type of every store operation.
//! - `memory`: `InMemoryStore`, with save counters and failure injection for
//!   exercising partial-failure paths.

pub mod error;
pub mod memory;
pub mod store;
