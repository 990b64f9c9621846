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

use crate::{
    index::{CheckpointIndex, Node, SlotIndex},
    schedule::{ScheduleError, SlotSchedule},
};
use fixedbitset::FixedBitSet;

#[inline(always)]
fn flatten_matrix(num_nodes: usize, from: usize, to: usize) -> usize {
    from * num_nodes + to
}

#[inline(always)]
fn flatten_openings(num_slots: usize, checkpoint: usize, slot: usize) -> usize {
    checkpoint * num_slots + slot
}

/// The error type for model construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelBuildError {
    /// The checkpoint count is outside `1..=Model::MAX_CHECKPOINTS`.
    CheckpointCountOutOfRange { got: usize },
    /// The slot table is invalid.
    Schedule(ScheduleError),
    /// A travel-time entry is negative or not finite.
    InvalidTravelTime { from: usize, to: usize, minutes: f32 },
    /// The event window ends before it starts.
    InvalidEventWindow { start: i32, end: i32 },
    /// The dwell time is negative.
    NegativeDwell { minutes: i32 },
}

impl std::fmt::Display for ModelBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckpointCountOutOfRange { got } => write!(
                f,
                "Checkpoint count must be in 1..={}, got {}",
                Model::MAX_CHECKPOINTS,
                got
            ),
            Self::Schedule(e) => write!(f, "Invalid slot schedule: {}", e),
            Self::InvalidTravelTime { from, to, minutes } => write!(
                f,
                "Travel time from node {} to node {} must be a non-negative finite number, got {}",
                from, to, minutes
            ),
            Self::InvalidEventWindow { start, end } => write!(
                f,
                "Event window must not end before it starts, got start {} and end {}",
                start, end
            ),
            Self::NegativeDwell { minutes } => {
                write!(f, "Dwell time must be non-negative, got {}", minutes)
            }
        }
    }
}

impl std::error::Error for ModelBuildError {}

impl From<ScheduleError> for ModelBuildError {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

/// The immutable instance describing one solve of the route planner.
///
/// This struct holds all pre-validated, queryable data:
/// - `travel_times[from * num_nodes + to]`: pair-wise travel minutes over
///   checkpoints plus Start and Finish (asymmetry permitted).
/// - `open_slots[checkpoint * num_slots + slot]`: whether an intermediate
///   checkpoint serves visitors in a slot.
/// - `finish_open[slot]`: whether Finish accepts arrivals in a slot.
/// - the slot schedule, the event window, the per-visit dwell, and the
///   host's pace parameters (`speed`, `naismith`), which the solver
///   carries but never consults.
///
/// Construction:
/// - Use [`ModelBuilder`] and call [`ModelBuilder::build`] to obtain a
///   validated `Model`.
#[derive(Debug, Clone)]
pub struct Model {
    travel_times: Vec<f32>, // len = num_nodes * num_nodes
    open_slots: FixedBitSet, // len = num_checkpoints * num_slots
    finish_open: FixedBitSet, // len = num_slots
    schedule: SlotSchedule,
    num_checkpoints: usize,
    start_time: i32,
    end_time: i32,
    dwell: i32,
    speed: f32,
    naismith: f32,
}

impl Model {
    /// The maximum number of intermediate checkpoints an instance may have.
    ///
    /// The engine keys its state space by subset bitmasks of the visited
    /// checkpoints, so this bound also caps the mask width.
    pub const MAX_CHECKPOINTS: usize = 17;

    /// Returns the number of intermediate checkpoints.
    #[inline]
    pub fn num_checkpoints(&self) -> usize {
        self.num_checkpoints
    }

    /// Returns the number of travel-matrix nodes (checkpoints + Start + Finish).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_checkpoints + 2
    }

    /// Returns the number of service slots.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.schedule.num_slots()
    }

    /// Returns the slot schedule.
    #[inline]
    pub fn schedule(&self) -> &SlotSchedule {
        &self.schedule
    }

    /// Returns the minute the walker departs Start.
    #[inline]
    pub fn start_time(&self) -> i32 {
        self.start_time
    }

    /// Returns the event cut-off minute. No travel or service may occur
    /// after it.
    #[inline]
    pub fn end_time(&self) -> i32 {
        self.end_time
    }

    /// Returns the mandatory dwell in minutes at every intermediate
    /// checkpoint visit.
    #[inline]
    pub fn dwell(&self) -> i32 {
        self.dwell
    }

    /// Returns the host's walking speed. Carried through for the host;
    /// never consulted here.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns the host's Naismith pace coefficient. Carried through for
    /// the host; never consulted here.
    #[inline]
    pub fn naismith(&self) -> f32 {
        self.naismith
    }

    /// Returns the travel time in minutes between two nodes.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if a checkpoint node is out of bounds.
    #[inline]
    pub fn travel_time(&self, from: Node, to: Node) -> f32 {
        let offset = flatten_matrix(
            self.num_nodes(),
            from.position(self.num_checkpoints),
            to.position(self.num_checkpoints),
        );
        self.travel_times[offset]
    }

    /// Checks whether a checkpoint serves visitors in the given slot.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `checkpoint` or `slot` is out of bounds.
    #[inline]
    pub fn is_open(&self, checkpoint: CheckpointIndex, slot: SlotIndex) -> bool {
        debug_assert!(
            checkpoint.get() < self.num_checkpoints,
            "called `Model::is_open` with checkpoint index out of bounds: the len is {} but the index is {}",
            self.num_checkpoints,
            checkpoint.get()
        );
        debug_assert!(
            slot.get() < self.num_slots(),
            "called `Model::is_open` with slot index out of bounds: the len is {} but the index is {}",
            self.num_slots(),
            slot.get()
        );

        self.open_slots
            .contains(flatten_openings(self.num_slots(), checkpoint.get(), slot.get()))
    }

    /// Checks whether Finish accepts arrivals in the given slot.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `slot` is out of bounds.
    #[inline]
    pub fn is_finish_open(&self, slot: SlotIndex) -> bool {
        debug_assert!(
            slot.get() < self.num_slots(),
            "called `Model::is_finish_open` with slot index out of bounds: the len is {} but the index is {}",
            self.num_slots(),
            slot.get()
        );

        self.finish_open.contains(slot.get())
    }
}

/// A mutable builder that assembles and validates a [`Model`].
///
/// Travel times default to zero, all slots start closed, and the event
/// window, dwell, and pace parameters default to zero until set.
///
/// # Examples
///
/// ```rust
/// # use cairn_model::index::{CheckpointIndex, Node, SlotIndex};
/// # use cairn_model::model::ModelBuilder;
///
/// let mut builder = ModelBuilder::new(2, vec![600, 630]);
/// builder
///     .event_window(600, 720)
///     .dwell(7)
///     .set_travel_time(Node::Start, Node::Checkpoint(CheckpointIndex::new(0)), 5.0)
///     .open_checkpoint(CheckpointIndex::new(0), SlotIndex::new(0))
///     .open_finish(SlotIndex::new(1));
/// let model = builder.build().unwrap();
/// assert_eq!(model.num_checkpoints(), 2);
/// assert!(model.is_open(CheckpointIndex::new(0), SlotIndex::new(0)));
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    num_checkpoints: usize,
    slot_starts: Vec<i32>,
    travel_times: Vec<f32>,
    open_slots: FixedBitSet,
    finish_open: FixedBitSet,
    start_time: i32,
    end_time: i32,
    dwell: i32,
    speed: f32,
    naismith: f32,
}

impl ModelBuilder {
    /// Creates a builder for an instance with the given checkpoint count
    /// and slot-start minutes. Dimension validation happens in
    /// [`Self::build`].
    pub fn new(num_checkpoints: usize, slot_starts: Vec<i32>) -> Self {
        let num_nodes = num_checkpoints + 2;
        let num_slots = slot_starts.len();

        Self {
            num_checkpoints,
            travel_times: vec![0.0; num_nodes * num_nodes],
            open_slots: FixedBitSet::with_capacity(num_checkpoints * num_slots),
            finish_open: FixedBitSet::with_capacity(num_slots),
            slot_starts,
            start_time: 0,
            end_time: 0,
            dwell: 0,
            speed: 0.0,
            naismith: 0.0,
        }
    }

    /// Sets the travel time in minutes between two nodes.
    ///
    /// # Panics
    ///
    /// Panics if a checkpoint node is out of bounds.
    pub fn set_travel_time(&mut self, from: Node, to: Node, minutes: f32) -> &mut Self {
        let offset = flatten_matrix(
            self.num_checkpoints + 2,
            from.position(self.num_checkpoints),
            to.position(self.num_checkpoints),
        );
        self.travel_times[offset] = minutes;
        self
    }

    /// Marks a checkpoint as serving visitors in the given slot.
    ///
    /// # Panics
    ///
    /// Panics if `checkpoint` or `slot` is out of bounds.
    pub fn open_checkpoint(&mut self, checkpoint: CheckpointIndex, slot: SlotIndex) -> &mut Self {
        assert!(
            checkpoint.get() < self.num_checkpoints,
            "called `ModelBuilder::open_checkpoint` with checkpoint index out of bounds: the len is {} but the index is {}",
            self.num_checkpoints,
            checkpoint.get()
        );
        assert!(
            slot.get() < self.slot_starts.len(),
            "called `ModelBuilder::open_checkpoint` with slot index out of bounds: the len is {} but the index is {}",
            self.slot_starts.len(),
            slot.get()
        );

        self.open_slots
            .insert(flatten_openings(self.slot_starts.len(), checkpoint.get(), slot.get()));
        self
    }

    /// Marks Finish as accepting arrivals in the given slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    pub fn open_finish(&mut self, slot: SlotIndex) -> &mut Self {
        assert!(
            slot.get() < self.slot_starts.len(),
            "called `ModelBuilder::open_finish` with slot index out of bounds: the len is {} but the index is {}",
            self.slot_starts.len(),
            slot.get()
        );

        self.finish_open.insert(slot.get());
        self
    }

    /// Sets the event window in minutes past midnight.
    pub fn event_window(&mut self, start: i32, end: i32) -> &mut Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Sets the mandatory per-visit dwell in minutes.
    pub fn dwell(&mut self, minutes: i32) -> &mut Self {
        self.dwell = minutes;
        self
    }

    /// Sets the host's walking speed (carried through, never consulted).
    pub fn speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    /// Sets the host's Naismith coefficient (carried through, never
    /// consulted).
    pub fn naismith(&mut self, naismith: f32) -> &mut Self {
        self.naismith = naismith;
        self
    }

    /// Validates the assembled instance and produces a [`Model`].
    pub fn build(self) -> Result<Model, ModelBuildError> {
        if self.num_checkpoints == 0 || self.num_checkpoints > Model::MAX_CHECKPOINTS {
            return Err(ModelBuildError::CheckpointCountOutOfRange {
                got: self.num_checkpoints,
            });
        }

        let schedule = SlotSchedule::new(self.slot_starts)?;

        let num_nodes = self.num_checkpoints + 2;
        for from in 0..num_nodes {
            for to in 0..num_nodes {
                let minutes = self.travel_times[flatten_matrix(num_nodes, from, to)];
                if !minutes.is_finite() || minutes < 0.0 {
                    return Err(ModelBuildError::InvalidTravelTime { from, to, minutes });
                }
            }
        }

        if self.end_time < self.start_time {
            return Err(ModelBuildError::InvalidEventWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }

        if self.dwell < 0 {
            return Err(ModelBuildError::NegativeDwell { minutes: self.dwell });
        }

        Ok(Model {
            travel_times: self.travel_times,
            open_slots: self.open_slots,
            finish_open: self.finish_open,
            schedule,
            num_checkpoints: self.num_checkpoints,
            start_time: self.start_time,
            end_time: self.end_time,
            dwell: self.dwell,
            speed: self.speed,
            naismith: self.naismith,
        })
    }
}
