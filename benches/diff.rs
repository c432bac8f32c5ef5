use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use itertools::Itertools;
use tree_correction::{compute_diff, Nested, Tree};

fn nested(leaves: Vec<Nested<u8>>, r: usize) -> Nested<u8> {
    if leaves.len() < r {
        (0, leaves).into()
    } else {
        let chunks = (leaves.len() + r - 1) / r;
        let children = leaves
            .into_iter()
            .chunks(chunks)
            .into_iter()
            .map(|c| nested(c.collect(), r))
            .collect::<Vec<_>>();

        (0, children).into()
    }
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("n-tree diff");
    for r in [4, 8, 16] {
        group.bench_with_input(
            BenchmarkId::from_parameter(r),
            &Tree::from_nested(nested(vec![Nested::default(); 16], r)),
            |b, t| b.iter(|| compute_diff(t, t)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
