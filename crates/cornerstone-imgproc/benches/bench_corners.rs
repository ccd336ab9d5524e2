use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cornerstone_image::Image;
use cornerstone_imgproc::features::{CornerDetector, CornerDetectorConfig, CornerMetric};
use cornerstone_imgproc::parallel::ExecutionStrategy;

// checkerboard with 32 pixel cells, a corner at every cell junction
fn checkerboard(width: usize, height: usize) -> Image<u8, 1> {
    let data = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            if (x / 32 + y / 32) % 2 == 0 {
                40
            } else {
                220
            }
        })
        .collect();
    Image::new([width, height].into(), data).unwrap()
}

fn bench_corner_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("CornerDetector");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image = checkerboard(*width, *height);

        for metric in [
            CornerMetric::Harris,
            CornerMetric::HarmonicMean,
            CornerMetric::MinEigen,
        ] {
            for execution in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
                let parameter_string = format!("{}x{}", width, height);
                let name = format!("{metric}_{execution:?}").to_lowercase();

                let config = CornerDetectorConfig::default()
                    .with_metric(metric)
                    .with_execution(execution);
                let detector = CornerDetector::new(config).unwrap();

                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &image,
                    |b, i| b.iter(|| black_box(detector.detect(i)).unwrap()),
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, bench_corner_detector);
criterion_main!(benches);
