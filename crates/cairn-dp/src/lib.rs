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

//! # Cairn DP
//!
//! **The Bitmask Dynamic-Programming Engine of the Cairn Solver.**
//!
//! Given a validated [`cairn_model::model::Model`], this crate computes the
//! tour from Start to Finish that visits the maximum number of distinct
//! checkpoints and, among tours achieving that maximum, arrives at Finish
//! earliest.
//!
//! ## Formulation
//!
//! The engine maintains `depart[S, i]`: the earliest minute at which the
//! walker can finish serving checkpoint `i` (arrival, wait for an open
//! slot, plus dwell) having visited exactly the subset `S` of checkpoints,
//! with `i ∈ S`. A state is only recorded if Finish remains reachable from
//! it inside the event window, so infeasible branches are pruned forward.
//! Subsets are processed in order of increasing cardinality, which
//! guarantees every extension reads a finalized predecessor value.
//!
//! After the sweep, a scan over all `(S, i)` states picks the lexicographic
//! best terminal (visit count descending, actual Finish arrival ascending)
//! and the visiting order is rebuilt from stored parent links.
//!
//! The state space is `N · 2^N`; with the compile-time maximum of 17
//! checkpoints that is ~2.2 million states per array, allocated once per
//! solve and released on return. A solve is a pure, single-threaded
//! function of its input: concurrent solves on disjoint models are
//! independent.

pub mod feasibility;
pub mod solver;
pub mod state;
pub mod stats;

pub use solver::{solve, DpSolver, SolveOutcome};
