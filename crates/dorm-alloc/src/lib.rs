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

//! Dorm-Alloc: seniority-first room allocation
//!
//! Assigns unassigned students to dormitory rooms in a single, deterministic
//! pass per gender partition. Given a store and a request (criteria plus an
//! optional building/block scope), the engine
//!
//! - queries the matching unassigned students and splits them by gender,
//! - orders each partition seniors first (by department, then name), then
//!   freshmen by name,
//! - fills the partition's candidate rooms greedily in building, floor and
//!   room-number order, saving every student and every touched room.
//!
//! Guarantees
//! - No room exceeds its capacity; no student lands in a room of another gender.
//! - Identical inputs yield identical placement lists.
//! - A failed save aborts the run; earlier saves stay committed.
//!
//! Module map
//! - `engine`: orchestration and the `AllocationEngineBuilder`.
//! - `sorter`: priority ordering within a partition.
//! - `filler`: greedy first-fit room filling.
//! - `monitor`: run observers (log, composite, no-op).
//! - `outcome`: per-partition and aggregate results, response shape.
//! - `stats`: run counters and timing.
//! - `error`: `AllocationError`.

pub mod engine;
pub mod error;
pub mod filler;
pub mod monitor;
pub mod outcome;
pub mod sorter;
pub mod stats;
