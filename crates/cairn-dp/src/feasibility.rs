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

//! The feasibility oracle.
//!
//! Two questions come up on every DP transition: "arriving at checkpoint
//! `c` at minute `t`, when does `c` first serve me?" and "departing
//! checkpoint `i` at minute `t`, can I still make Finish — and when?".
//! Both reduce to scanning the slot table upward from the arrival slot.
//!
//! The two scans clamp differently at the bottom of the table, and the
//! difference is contractual: an early arrival at a checkpoint simply
//! waits for the first slot (scan from index 0), while a Finish arrival
//! before the table opens is infeasible outright.

use cairn_model::{
    index::{CheckpointIndex, Node, SlotIndex},
    model::Model,
    time::Minute,
};

/// Returns the earliest minute at or after `arrival` at which the
/// checkpoint serves visitors, or absence when no slot at or after the
/// arrival slot is open.
///
/// An arrival before the first slot start waits for the table to open:
/// the scan is clamped down to slot 0.
pub fn earliest_open(model: &Model, checkpoint: CheckpointIndex, arrival: f32) -> Minute<f32> {
    let first = model
        .schedule()
        .slot_of(arrival)
        .map_or(0, |slot| slot.get());

    for s in first..model.num_slots() {
        let slot = SlotIndex::new(s);
        if model.is_open(checkpoint, slot) {
            let start = model.schedule().start_of(slot) as f32;
            return Minute::some(if arrival > start { arrival } else { start });
        }
    }

    Minute::none()
}

/// Returns the actual Finish arrival minute for a walker departing
/// checkpoint `from` at minute `depart`, or absence when Finish cannot be
/// reached inside the event window.
///
/// The walker travels to Finish, then waits for the first open Finish slot
/// at or after the travel arrival. Infeasible when the travel arrival
/// already exceeds the event end, falls before the slot table, or when the
/// waited-for arrival exceeds the event end. Unlike [`earliest_open`],
/// there is no downward clamp.
///
/// This single evaluator serves both as the pruning predicate of the DP
/// sweep (`is_some`) and as the finish-time objective of the terminal
/// scan.
pub fn finish_arrival(model: &Model, from: CheckpointIndex, depart: f32) -> Minute<f32> {
    let at_finish = depart + model.travel_time(Node::Checkpoint(from), Node::Finish);
    if at_finish > model.end_time() as f32 {
        return Minute::none();
    }

    let first = match model.schedule().slot_of(at_finish) {
        Some(slot) => slot.get(),
        None => return Minute::none(),
    };

    for s in first..model.num_slots() {
        let slot = SlotIndex::new(s);
        if model.is_finish_open(slot) {
            let start = model.schedule().start_of(slot) as f32;
            let actual = if at_finish > start { at_finish } else { start };
            return if actual <= model.end_time() as f32 {
                Minute::some(actual)
            } else {
                Minute::none()
            };
        }
    }

    Minute::none()
}
