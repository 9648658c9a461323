use bwt_fm_index::FMIndex;

use criterion::{criterion_group, criterion_main};
use criterion::{AxisScale, BatchSize, BenchmarkId, Criterion, PlotConfiguration, Throughput};

mod common;

fn prepare(len: usize, prob: f64, m: usize) -> (FMIndex, Vec<Vec<u8>>) {
    let text = common::binary_text(len, prob);
    let patterns = common::binary_patterns(m);
    (FMIndex::new(&text).unwrap(), patterns)
}

pub fn bench(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = c.benchmark_group("count");
    let n = 50000;
    let m = 8;
    group.plot_config(plot_config);
    group.throughput(Throughput::Elements(1 << m as u32));
    for prob in [0.5, 0.05, 0.005].iter() {
        group.bench_with_input(BenchmarkId::new("FMIndex", prob), prob, |b, &prob| {
            b.iter_batched(
                || prepare(n, prob, m),
                |(index, patterns)| {
                    for pattern in patterns {
                        index.count(&pattern).unwrap();
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
