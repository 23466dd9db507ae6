//! Mouth scan benchmarks.
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --package tswitch-vision --bench tongue_fraction
//! ```
//!
//! Measures the per-face cost of the frame loop: polygon rasterization into
//! the pooled mask plus the HSV test on every mouth pixel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use std::time::Duration;
use tswitch_models::{FaceLandmarks, NormalizedPoint};
use tswitch_vision::{
    estimator::tongue_fraction, FaceAnalyzer, GestureConfig, MaskScratch, MouthRegion,
    TongueColorRule, INNER_LIP_LANDMARKS,
};

/// Synthetic frame with a gradient so the color test takes both branches.
fn create_test_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 7 + y * 11) % 256) as u8,
            ((x * 13 + y * 17) % 256) as u8,
            ((x * 19 + y * 23) % 256) as u8,
        ])
    })
}

/// Open mouth covering `scale` of the frame width.
fn create_face(scale: f32) -> FaceLandmarks {
    let mut lm = FaceLandmarks::filled(468, NormalizedPoint::new(0.5, 0.5));
    let n = INNER_LIP_LANDMARKS.len();
    for (i, &index) in INNER_LIP_LANDMARKS.iter().enumerate() {
        let angle = std::f32::consts::PI + i as f32 * std::f32::consts::TAU / n as f32;
        lm.set(
            index,
            NormalizedPoint::new(0.5 + scale * angle.cos(), 0.5 + scale * 0.5 * angle.sin()),
        );
    }
    lm
}

fn bench_tongue_fraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tongue_fraction");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    let rule = TongueColorRule::default();
    for (width, height) in [(640, 480), (1280, 720)] {
        let frame = create_test_frame(width, height);
        for scale in [0.05f32, 0.15] {
            let face = create_face(scale);
            let region = MouthRegion::extract(&face, &INNER_LIP_LANDMARKS, width, height)
                .expect("landmarks cover the lip contour");
            let mut scratch = MaskScratch::new();

            group.throughput(Throughput::Elements(region.roi.area() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{}x{}", width, height), scale),
                &region,
                |b, region| {
                    b.iter(|| black_box(tongue_fraction(black_box(&frame), region, &mut scratch, &rule)))
                },
            );
        }
    }

    group.finish();
}

fn bench_analyze_face(c: &mut Criterion) {
    let frame = create_test_frame(640, 480);
    let face = create_face(0.1);
    let analyzer = FaceAnalyzer::new(&GestureConfig::default());
    let mut scratch = MaskScratch::new();

    c.bench_function("analyze_face_640x480", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&frame), &face, &mut scratch)))
    });
}

criterion_group!(benches, bench_tongue_fraction, bench_analyze_face);
criterion_main!(benches);
