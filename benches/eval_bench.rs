use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slotcalc::alloc::Allocator;
use slotcalc::driver::{run, RunConfig};
use slotcalc::eval::{Evaluator, OverflowPolicy};

fn bench_dispatch(c: &mut Criterion) {
    let wrapping = Evaluator::default();
    let checked = Evaluator::new(OverflowPolicy::Checked);

    c.bench_function("evaluate_wrapping_all_ops", |b| {
        b.iter(|| {
            for code in ['+', '-', '*', '/'] {
                let _ = black_box(wrapping.evaluate(black_box(10), black_box(5), code));
            }
        })
    });

    c.bench_function("evaluate_checked_all_ops", |b| {
        b.iter(|| {
            for code in ['+', '-', '*', '/'] {
                let _ = black_box(checked.evaluate(black_box(10), black_box(5), code));
            }
        })
    });
}

fn bench_buffer_lifecycle(c: &mut Criterion) {
    let allocator = Allocator::new();

    c.bench_function("allocate_fill_release_100", |b| {
        b.iter(|| {
            if let Ok(mut buffer) = allocator.allocate(black_box(100)) {
                buffer.fill_indices();
                black_box(buffer.release());
            }
        })
    });

    c.bench_function("driver_default_run", |b| {
        b.iter(|| black_box(run(RunConfig::default())))
    });
}

criterion_group!(benches, bench_dispatch, bench_buffer_lifecycle);
criterion_main!(benches);
