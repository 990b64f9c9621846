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

use cairn_dp::solve;
use cairn_model::index::{CheckpointIndex, Node, SlotIndex};
use cairn_model::model::{Model, ModelBuilder};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn node_at(position: usize, num_checkpoints: usize) -> Node {
    if position < num_checkpoints {
        Node::Checkpoint(CheckpointIndex::new(position))
    } else if position == num_checkpoints {
        Node::Start
    } else {
        Node::Finish
    }
}

/// Builds a dense daylight instance: every slot open, seeded pseudo-random
/// travel times, so the sweep populates most of the state space.
fn dense_instance(num_checkpoints: usize) -> Model {
    let mut rng = StdRng::seed_from_u64(num_checkpoints as u64);

    let num_slots = 14;
    let starts: Vec<i32> = (0..num_slots).map(|s| 600 + 30 * s).collect();
    let mut builder = ModelBuilder::new(num_checkpoints, starts);
    builder.event_window(600, 1020).dwell(7).speed(4.0).naismith(10.0);

    let num_nodes = num_checkpoints + 2;
    for from in 0..num_nodes {
        for to in 0..num_nodes {
            if from != to {
                let minutes = rng.gen_range(10..=60) as f32 * 0.5;
                builder.set_travel_time(
                    node_at(from, num_checkpoints),
                    node_at(to, num_checkpoints),
                    minutes,
                );
            }
        }
    }
    for c in 0..num_checkpoints {
        for s in 0..num_slots as usize {
            builder.open_checkpoint(CheckpointIndex::new(c), SlotIndex::new(s));
        }
    }
    for s in 0..num_slots as usize {
        builder.open_finish(SlotIndex::new(s));
    }

    builder.build().expect("benchmark instance must be valid")
}

fn bench_dense_solves(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_solve");

    for &num_checkpoints in &[8usize, 10, 12] {
        let model = dense_instance(num_checkpoints);
        let states = num_checkpoints as u64 * (1u64 << num_checkpoints);

        group.throughput(Throughput::Elements(states));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_checkpoints),
            &model,
            |b, model| {
                b.iter(|| {
                    let outcome = solve(black_box(model));
                    black_box(outcome.solution().count())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dense_solves);
criterion_main!(benches);
