use clipforge::command::{AddClipCommand, MoveClipCommand, UndoStack};
use clipforge::model::{Clip, MediaAsset, MediaKind, Track};
use clipforge::Project;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn asset() -> clipforge::SharedAsset {
    MediaAsset::shared("/media/bench.mp4", MediaKind::Video, 2_000)
}

/// Benchmark ordered insertion into crowded tracks
fn bench_track_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("track_insertion");

    for clip_count in [100, 1_000, 10_000] {
        let mut track = Track::new(0, "bench");
        for i in 0..clip_count {
            if let Ok(clip) = Clip::new(asset(), 0, 1_000, i * 1_000) {
                track.add_clip(clip);
            }
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(clip_count),
            &clip_count,
            |b, &count| {
                b.iter_batched(
                    || track.clone(),
                    |mut track| {
                        // Middle of the track, worst case for the shift
                        if let Ok(clip) = Clip::new(asset(), 0, 500, count * 500) {
                            track.add_clip(black_box(clip));
                        }
                        track
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

/// Benchmark push/undo/redo cycles through a bounded history
fn bench_history_cycle(c: &mut Criterion) {
    c.bench_function("push_undo_redo", |b| {
        let mut project = Project::new("Bench");
        let mut stack = UndoStack::with_capacity(100);

        b.iter(|| {
            let command = AddClipCommand::new(0, asset(), 0);
            let _ = black_box(stack.push(Box::new(command), &mut project));
            let _ = black_box(stack.undo(&mut project));
            let _ = black_box(stack.redo(&mut project));
            // Leave the timeline as it was so iterations stay comparable
            let _ = stack.undo(&mut project);
        });
    });
}

/// Benchmark a drag gesture coalescing into one entry
fn bench_move_coalescing(c: &mut Criterion) {
    c.bench_function("move_coalescing_100_steps", |b| {
        b.iter_batched(
            || {
                let mut project = Project::new("Bench");
                let id = project.add_clip(0, asset(), 0, 0, None).ok();
                (project, id)
            },
            |(mut project, id)| {
                if let Some(id) = id {
                    for step in 1..=100u64 {
                        let _ = project.submit(Box::new(MoveClipCommand::new(0, id, step * 10)));
                    }
                }
                project
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_track_insertion,
    bench_history_cycle,
    bench_move_coalescing
);
criterion_main!(benches);
