use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vdiff_text::{align_text, unified_diff, Granularity, UnifiedOptions};

fn make_text(lines: usize, every: usize, tag: &str) -> String {
    (0..lines)
        .map(|i| {
            if every > 0 && i % every == 0 {
                format!("{tag} line {i}\n")
            } else {
                format!("line {i}\n")
            }
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_lines");
    for lines in [1_000usize, 4_000] {
        let old = make_text(lines, 0, "");
        let new = make_text(lines, 97, "changed");
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| align_text(black_box(&old), black_box(&new), Granularity::Lines))
        });
    }
    group.finish();
}

fn bench_unified(c: &mut Criterion) {
    let old = make_text(2_000, 0, "");
    let new = make_text(2_000, 250, "edited");
    let options = UnifiedOptions::default();
    c.bench_function("unified_2000_lines", |b| {
        b.iter(|| unified_diff(black_box(&old), black_box(&new), &options).to_string())
    });
}

criterion_group!(benches, bench_align, bench_unified);
criterion_main!(benches);
