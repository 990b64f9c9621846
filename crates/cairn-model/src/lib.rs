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

//! # Cairn Model
//!
//! **The Core Domain Model for the Cairn Checkpoint-Tour Solver.**
//!
//! This crate defines the data structures describing a time-windowed
//! checkpoint tour instance: a small set of checkpoints with half-hour
//! service slots, a Start and a Finish node, a dense pair-wise travel-time
//! matrix, a fixed dwell per visit, and an overall event window. It is the
//! data interchange layer between the problem definition (host input) and
//! the solving engine (`cairn_dp`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **solving**:
//!
//! * **`index`**: Strongly-typed wrappers (`CheckpointIndex`, `SlotIndex`)
//!   and the `Node` addressing scheme for the travel matrix.
//! * **`time`**: `Minute<T>`, a sentinel-encoded minutes-past-midnight
//!   value for performance-critical dense arrays.
//! * **`schedule`**: The half-hour slot-start table and the arrival-minute
//!   to slot-index arithmetic.
//! * **`model`**: The `Model` (immutable, optimized for solving) and
//!   `ModelBuilder` (mutable, optimized for configuration).
//! * **`solution`**: The output format, including the host boundary
//!   encoding.
//! * **`loading`**: A text-format instance loader for fixtures, tests,
//!   and benchmarks.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally
//!     use a `SlotIndex` to access a checkpoint.
//! 2.  **Memory Layout**: Matrices are stored flattened (Structure of
//!     Arrays) to maximize cache locality during the subset sweep.
//! 3.  **Fail-Fast**: The builder validates inputs eagerly so the solver
//!     never sees an invalid instance.

pub mod index;
pub mod loading;
pub mod model;
pub mod schedule;
pub mod solution;
pub mod time;
