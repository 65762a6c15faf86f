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

//! Positional indices into a snapshot.
//!
//! Stores and the filler keep students and rooms in flat vectors. Indexing
//! those vectors with bare `usize` invites swapping a student position for a
//! room position; `TypedIndex<T>` tags the position with its domain at zero
//! runtime cost.

use std::marker::PhantomData;

/// Names an index domain for `Debug` and `Display` output.
pub trait IndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` position tagged with the collection it points into.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index at position `index`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index one past this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: IndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: IndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}

/// Tag for positions in a student collection.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StudentIndexTag;

impl IndexTag for StudentIndexTag {
    const NAME: &'static str = "StudentIndex";
}

/// A position in a student collection.
pub type StudentIndex = TypedIndex<StudentIndexTag>;

/// Tag for positions in a room collection.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RoomIndexTag;

impl IndexTag for RoomIndexTag {
    const NAME: &'static str = "RoomIndex";
}

/// A position in a room collection.
pub type RoomIndex = TypedIndex<RoomIndexTag>;
