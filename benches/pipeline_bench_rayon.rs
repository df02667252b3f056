use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use tunga::error::Error;
use tunga::pipeline::{tokenize, ParConfig};

const NB_LINES: usize = 20_000;

// bench protocol:
//
// Tokenize the same synthetic corpus with a growing number of workers,
// chunksize and batch size being constant.
fn corpus() -> Vec<String> {
    (0..NB_LINES)
        .map(|x| {
            format!(
                "Í gær, {} manns hlupu t.d. í hring... og sögðu \"halló\" við nýja-nágrannann!",
                x
            )
        })
        .collect()
}

fn tokenize_all(lines: &[String], threads: usize) {
    let source = lines.iter().cloned().map(Ok::<String, Error>);
    let config = ParConfig::new(threads, 5_000, 500);
    let nb = tokenize(source, "is", config)
        .unwrap()
        .filter(Result::is_ok)
        .count();
    assert_eq!(nb, lines.len());
}

fn bench_tokenize(c: &mut Criterion) {
    let lines = corpus();
    let mut group = c.benchmark_group("Tokenize");
    group.sample_size(10);
    for threads in [1, 2, 4] {
        group.bench_with_input(
            BenchmarkId::new("ordered parallel map", threads),
            &threads,
            |b, threads| b.iter(|| tokenize_all(&lines, *threads)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
