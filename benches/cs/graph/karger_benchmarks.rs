use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use karger::{estimate_min_cut, karger_min_cut, KargerConfig, Multigraph};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn complete_graph(n: usize) -> Multigraph {
    let mut graph = Multigraph::new();
    for u in 0..n {
        for v in (u + 1)..n {
            graph.add_edge(u, v);
        }
    }
    graph
}

fn grid_graph(width: usize, height: usize) -> Multigraph {
    let mut graph = Multigraph::new();
    for i in 0..height {
        for j in 0..width {
            let v = i * width + j;
            if j + 1 < width {
                graph.add_edge(v, v + 1);
            }
            if i + 1 < height {
                graph.add_edge(v, v + width);
            }
        }
    }
    graph
}

fn bench_single_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_trial");
    for &n in &[20, 50, 100] {
        let graph = complete_graph(n);
        group.bench_with_input(BenchmarkId::new("complete", n), &graph, |b, graph| {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            b.iter(|| estimate_min_cut(black_box(graph.clone()), &mut rng).unwrap());
        });
    }
    for &side in &[10, 20] {
        let graph = grid_graph(side, side);
        group.bench_with_input(BenchmarkId::new("grid", side), &graph, |b, graph| {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            b.iter(|| estimate_min_cut(black_box(graph.clone()), &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_trials(c: &mut Criterion) {
    let mut group = c.benchmark_group("trials");
    group.sample_size(10);
    let graph = grid_graph(8, 8);
    for parallel in [false, true] {
        let config = KargerConfig::new().trials(256).seed(1).parallel(parallel);
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| karger_min_cut(black_box(&graph), &config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_trial, bench_trials);
criterion_main!(benches);
