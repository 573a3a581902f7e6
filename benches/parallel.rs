mod common;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use protalign::batch::{align_batch, best_scores};
use protalign::{AlignMode, SubstitutionTable};

fn bench_group(c: &mut Criterion) {
    let blosum = SubstitutionTable::blosum62();
    let aligner = common::aligner(&blosum);

    let mut group = c.benchmark_group("batch");
    for file in &["short.txt", "medium.txt"] {
        let (seq_1, seq_2) = common::load_pair(file);
        for size in [8, 64] {
            let pairs = vec![(seq_1.clone(), seq_2.clone()); size];
            group.bench_with_input(BenchmarkId::new(format!("align/{file}"), size), &pairs, |b, pairs| {
                b.iter(|| align_batch(&aligner, black_box(pairs), AlignMode::Local).unwrap())
            });
            group.bench_with_input(BenchmarkId::new(format!("score/{file}"), size), &pairs, |b, pairs| {
                b.iter(|| best_scores(&aligner, black_box(pairs), AlignMode::Local).unwrap())
            });
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = bench_group
}

criterion_main!(benches);
