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

//! Dense DP state storage for the subset sweep.
//!
//! The engine keys its state space by `(subset mask, last checkpoint)`.
//! Both the departure minutes and the parent links live in flat arrays of
//! `num_checkpoints * 2^num_checkpoints` cells, indexed as
//! `mask * num_checkpoints + last`. Departure cells use the sentinel
//! encoding of [`Minute`], so an untouched cell compares greater than any
//! candidate and the strict-`<` improvement check needs no branch on
//! presence.
//!
//! Parent links keep the unvisited and the route-head sentinels distinct:
//! reconstruction must be able to tell "this chain starts at Start" apart
//! from "this chain is broken".

use cairn_model::{index::CheckpointIndex, model::Model, time::Minute};

/// The provenance of a DP state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParentLink {
    /// The cell has never been written. Meeting this mid-chain during
    /// reconstruction signals a bug in the sweep.
    Unvisited,
    /// The state was seeded directly from Start (singleton subset).
    FromStart,
    /// The state extends the `(mask, last)` predecessor state.
    FromPrev {
        /// The predecessor's visited-subset mask.
        mask: u32,
        /// The predecessor's last checkpoint position.
        last: u8,
    },
}

/// The two dense arrays of the subset sweep.
///
/// One full table for an event-day instance (17 checkpoints) holds
/// `17 * 2^17` cells per array; both are allocated in one go per solve and
/// dropped with the table.
#[derive(Clone, Debug)]
pub struct DpTable {
    depart: Vec<Minute<f32>>,
    parents: Vec<ParentLink>,
    num_checkpoints: usize,
}

impl DpTable {
    /// Creates a table for an instance with the given checkpoint count,
    /// with every state unvisited.
    ///
    /// # Panics
    ///
    /// Panics if `num_checkpoints` is not in `1..=Model::MAX_CHECKPOINTS`.
    pub fn new(num_checkpoints: usize) -> Self {
        assert!(
            num_checkpoints >= 1 && num_checkpoints <= Model::MAX_CHECKPOINTS,
            "called `DpTable::new` with checkpoint count out of range: expected 1..={}, got {}",
            Model::MAX_CHECKPOINTS,
            num_checkpoints
        );

        let num_states = num_checkpoints << num_checkpoints;
        Self {
            depart: vec![Minute::none(); num_states],
            parents: vec![ParentLink::Unvisited; num_states],
            num_checkpoints,
        }
    }

    /// Returns the number of `(mask, last)` states in the table.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.depart.len()
    }

    /// Returns the number of checkpoints the table was sized for.
    #[inline]
    pub fn num_checkpoints(&self) -> usize {
        self.num_checkpoints
    }

    #[inline(always)]
    fn cell(&self, mask: u32, last: CheckpointIndex) -> usize {
        debug_assert!(
            (mask as usize) < (1usize << self.num_checkpoints),
            "called `DpTable::cell` with mask out of range: the mask space is 2^{} but the mask is {}",
            self.num_checkpoints,
            mask
        );
        debug_assert!(
            last.get() < self.num_checkpoints,
            "called `DpTable::cell` with checkpoint index out of bounds: the len is {} but the index is {}",
            self.num_checkpoints,
            last.get()
        );

        mask as usize * self.num_checkpoints + last.get()
    }

    /// Returns the recorded departure minute of a state, absent when the
    /// state was never reached.
    #[inline]
    pub fn depart(&self, mask: u32, last: CheckpointIndex) -> Minute<f32> {
        self.depart[self.cell(mask, last)]
    }

    /// Returns the parent link of a state.
    #[inline]
    pub fn parent(&self, mask: u32, last: CheckpointIndex) -> ParentLink {
        self.parents[self.cell(mask, last)]
    }

    /// Records a departure minute for a state if it strictly improves on
    /// the stored one (the first writer wins ties). Returns whether the
    /// state was written.
    #[inline]
    pub fn record(
        &mut self,
        mask: u32,
        last: CheckpointIndex,
        depart: f32,
        parent: ParentLink,
    ) -> bool {
        let cell = self.cell(mask, last);
        if depart < self.depart[cell].raw() {
            self.depart[cell] = Minute::some(depart);
            self.parents[cell] = parent;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(i: usize) -> CheckpointIndex {
        CheckpointIndex::new(i)
    }

    #[test]
    fn test_new_table_is_unvisited() {
        let table = DpTable::new(3);
        assert_eq!(table.num_states(), 3 << 3);
        assert_eq!(table.num_checkpoints(), 3);

        for mask in 0..(1u32 << 3) {
            for i in 0..3 {
                assert!(table.depart(mask, cp(i)).is_none());
                assert_eq!(table.parent(mask, cp(i)), ParentLink::Unvisited);
            }
        }
    }

    #[test]
    fn test_record_writes_and_improves() {
        let mut table = DpTable::new(2);

        assert!(table.record(0b01, cp(0), 640.0, ParentLink::FromStart));
        assert_eq!(table.depart(0b01, cp(0)).into_option(), Some(640.0));
        assert_eq!(table.parent(0b01, cp(0)), ParentLink::FromStart);

        // A strictly better departure overwrites.
        assert!(table.record(
            0b01,
            cp(0),
            620.0,
            ParentLink::FromPrev { mask: 0b10, last: 1 }
        ));
        assert_eq!(table.depart(0b01, cp(0)).into_option(), Some(620.0));
        assert_eq!(
            table.parent(0b01, cp(0)),
            ParentLink::FromPrev { mask: 0b10, last: 1 }
        );
    }

    #[test]
    fn test_record_keeps_first_writer_on_ties() {
        let mut table = DpTable::new(2);

        assert!(table.record(0b11, cp(1), 615.0, ParentLink::FromStart));
        // An equal departure must not displace the stored parent.
        assert!(!table.record(
            0b11,
            cp(1),
            615.0,
            ParentLink::FromPrev { mask: 0b01, last: 0 }
        ));
        assert_eq!(table.parent(0b11, cp(1)), ParentLink::FromStart);

        // A worse one is ignored too.
        assert!(!table.record(0b11, cp(1), 700.0, ParentLink::FromStart));
        assert_eq!(table.depart(0b11, cp(1)).into_option(), Some(615.0));
    }

    #[test]
    fn test_states_are_independent() {
        let mut table = DpTable::new(3);
        table.record(0b101, cp(0), 611.0, ParentLink::FromStart);
        table.record(0b101, cp(2), 612.0, ParentLink::FromStart);

        assert_eq!(table.depart(0b101, cp(0)).into_option(), Some(611.0));
        assert_eq!(table.depart(0b101, cp(2)).into_option(), Some(612.0));
        assert!(table.depart(0b101, cp(1)).is_none());
        assert!(table.depart(0b001, cp(0)).is_none());
    }

    #[test]
    #[should_panic(expected = "called `DpTable::new` with checkpoint count out of range")]
    fn test_new_panics_on_zero_checkpoints() {
        let _ = DpTable::new(0);
    }
}
