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
    feasibility::{earliest_open, finish_arrival},
    state::{DpTable, ParentLink},
    stats::SolverStatistics,
};
use cairn_model::{
    index::{CheckpointIndex, Node},
    model::Model,
    solution::RouteSolution,
};
use smallvec::SmallVec;
use tracing::{debug, error, info};

/// The subset-sweep solver for the checkpoint-tour problem.
///
/// The solver is stateless between calls; a [`DpTable`] is allocated per
/// solve and dropped with it. Solving is a pure function of the model, so
/// concurrent solves on disjoint models are independent.
///
/// # Examples
///
/// ```rust
/// # use cairn_dp::DpSolver;
/// # use cairn_model::index::{CheckpointIndex, Node, SlotIndex};
/// # use cairn_model::model::ModelBuilder;
///
/// let mut builder = ModelBuilder::new(1, vec![600]);
/// builder
///     .event_window(600, 700)
///     .dwell(7)
///     .set_travel_time(Node::Start, Node::Checkpoint(CheckpointIndex::new(0)), 5.0)
///     .set_travel_time(Node::Checkpoint(CheckpointIndex::new(0)), Node::Finish, 5.0)
///     .open_checkpoint(CheckpointIndex::new(0), SlotIndex::new(0))
///     .open_finish(SlotIndex::new(0));
/// let model = builder.build().unwrap();
///
/// let outcome = DpSolver::new().solve(&model);
/// assert_eq!(outcome.solution().count(), 1);
/// assert_eq!(outcome.solution().finish_time(), 617.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DpSolver;

impl DpSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the given instance.
    #[inline]
    pub fn solve(&self, model: &Model) -> SolveOutcome {
        SolveSession::new(model).run()
    }
}

/// Solves the given instance with a fresh [`DpSolver`].
#[inline]
pub fn solve(model: &Model) -> SolveOutcome {
    DpSolver::new().solve(model)
}

/// Result of the solver after a run: the chosen tour plus statistics.
///
/// An infeasible instance is not an error; it yields the empty solution.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    solution: RouteSolution,
    statistics: SolverStatistics,
}

impl SolveOutcome {
    /// Returns the chosen tour.
    #[inline]
    pub fn solution(&self) -> &RouteSolution {
        &self.solution
    }

    /// Consumes the outcome, returning the chosen tour.
    #[inline]
    pub fn into_solution(self) -> RouteSolution {
        self.solution
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Checks whether any tour reached Finish inside the event window.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        !self.solution.is_empty()
    }
}

/// A single solve run: the table, the popcount buckets, and the counters.
struct SolveSession<'a> {
    model: &'a Model,
    table: DpTable,
    /// Masks with at least one populated state, bucketed by popcount.
    /// Buckets may hold duplicates until the dedup pass at the end of the
    /// producing cardinality.
    buckets: Vec<Vec<u32>>,
    stats: SolverStatistics,
    started: std::time::Instant,
}

impl<'a> SolveSession<'a> {
    fn new(model: &'a Model) -> Self {
        let n = model.num_checkpoints();
        Self {
            model,
            table: DpTable::new(n),
            buckets: vec![Vec::new(); n + 1],
            stats: SolverStatistics::default(),
            started: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> SolveOutcome {
        info!(
            checkpoints = self.model.num_checkpoints(),
            slots = self.model.num_slots(),
            states = self.table.num_states(),
            "starting route solve"
        );

        self.seed();
        self.expand();

        let solution = match self.select_best() {
            Some((mask, last, finish)) => {
                let route = self.reconstruct(mask, last);
                RouteSolution::new(route, finish)
            }
            None => {
                info!("no feasible route found");
                RouteSolution::empty()
            }
        };

        if !solution.is_empty() {
            info!(
                count = solution.count(),
                finish_time = f64::from(solution.finish_time()),
                "route solve complete"
            );
        }

        self.stats.set_total_time(self.started.elapsed());
        SolveOutcome {
            solution,
            statistics: self.stats,
        }
    }

    /// Seeds the singleton subsets: Start to each checkpoint directly.
    fn seed(&mut self) {
        let depart_start = self.model.start_time() as f32;
        let dwell = self.model.dwell() as f32;
        let end = self.model.end_time() as f32;

        for j in 0..self.model.num_checkpoints() {
            let target = CheckpointIndex::new(j);
            self.stats.on_transition_examined();

            let arrival =
                depart_start + self.model.travel_time(Node::Start, Node::Checkpoint(target));
            let Some(open) = earliest_open(self.model, target, arrival).into_option() else {
                self.stats.on_pruning_window();
                continue;
            };
            let depart = open + dwell;
            if depart > end {
                self.stats.on_pruning_window();
                continue;
            }
            if finish_arrival(self.model, target, depart).is_none() {
                self.stats.on_pruning_finish();
                continue;
            }

            let mask = 1u32 << j;
            if self.table.record(mask, target, depart, ParentLink::FromStart) {
                self.stats.on_state_recorded();
                self.buckets[1].push(mask);
            }
        }

        self.buckets[1].sort_unstable();
        self.buckets[1].dedup();
    }

    /// Expands subsets in order of increasing cardinality, so every
    /// extension reads a finalized predecessor value.
    fn expand(&mut self) {
        let n = self.model.num_checkpoints();
        let dwell = self.model.dwell() as f32;
        let end = self.model.end_time() as f32;

        for size in 1..n {
            let masks = std::mem::take(&mut self.buckets[size]);
            debug!(size, masks = masks.len(), "expanding subsets");

            for mask in masks {
                for i in 0..n {
                    if mask & (1u32 << i) == 0 {
                        continue;
                    }
                    let from = CheckpointIndex::new(i);
                    let Some(depart_from) = self.table.depart(mask, from).into_option() else {
                        continue;
                    };

                    for j in 0..n {
                        if mask & (1u32 << j) != 0 {
                            continue;
                        }
                        let target = CheckpointIndex::new(j);
                        self.stats.on_transition_examined();

                        let arrival = depart_from
                            + self
                                .model
                                .travel_time(Node::Checkpoint(from), Node::Checkpoint(target));
                        if arrival > end {
                            self.stats.on_pruning_window();
                            continue;
                        }
                        let Some(open) =
                            earliest_open(self.model, target, arrival).into_option()
                        else {
                            self.stats.on_pruning_window();
                            continue;
                        };
                        let depart = open + dwell;
                        if depart > end {
                            self.stats.on_pruning_window();
                            continue;
                        }
                        if finish_arrival(self.model, target, depart).is_none() {
                            self.stats.on_pruning_finish();
                            continue;
                        }

                        let extended = mask | (1u32 << j);
                        let parent = ParentLink::FromPrev {
                            mask,
                            last: i as u8,
                        };
                        if self.table.record(extended, target, depart, parent) {
                            self.stats.on_state_recorded();
                            self.buckets[size + 1].push(extended);
                        }
                    }
                }
            }

            self.buckets[size + 1].sort_unstable();
            self.buckets[size + 1].dedup();
        }
    }

    /// Scans every populated state for the lexicographic best terminal:
    /// visit count descending, then actual Finish arrival ascending.
    /// Residual ties keep the first find in ascending `(mask, last)` order.
    fn select_best(&mut self) -> Option<(u32, CheckpointIndex, f32)> {
        let n = self.model.num_checkpoints();
        let mut best: Option<(u32, CheckpointIndex)> = None;
        let mut best_count = 0u32;
        let mut best_finish = f32::INFINITY;

        for mask in 1..(1u32 << n) {
            let count = mask.count_ones();
            for i in 0..n {
                let last = CheckpointIndex::new(i);
                let Some(depart) = self.table.depart(mask, last).into_option() else {
                    continue;
                };
                let Some(finish) = finish_arrival(self.model, last, depart).into_option() else {
                    continue;
                };
                self.stats.on_terminal_candidate();

                if count > best_count || (count == best_count && finish < best_finish) {
                    best = Some((mask, last));
                    best_count = count;
                    best_finish = finish;
                }
            }
        }

        best.map(|(mask, last)| (mask, last, best_finish))
    }

    /// Rebuilds the visiting order by walking parent links back to Start.
    fn reconstruct(&self, mask: u32, last: CheckpointIndex) -> Vec<CheckpointIndex> {
        let mut visits: SmallVec<[CheckpointIndex; Model::MAX_CHECKPOINTS]> = SmallVec::new();
        let mut mask = mask;
        let mut last = last;

        loop {
            visits.push(last);
            match self.table.parent(mask, last) {
                ParentLink::FromStart => break,
                ParentLink::Unvisited => {
                    error!(
                        mask,
                        last = last.get(),
                        "parent chain broken during reconstruction"
                    );
                    break;
                }
                ParentLink::FromPrev {
                    mask: prev_mask,
                    last: prev_last,
                } => {
                    mask = prev_mask;
                    last = CheckpointIndex::new(prev_last as usize);
                }
            }
        }

        visits.reverse();
        visits.into_vec()
    }
}
