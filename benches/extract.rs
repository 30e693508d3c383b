use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{Array2, Array3};

use phog_rust::filters::canny::{detect_edges, CannyThresholds, SuppressionMode};
use phog_rust::filters::edge::sobel_field;
use phog_rust::Phog;

fn synthetic_scene(width: usize, height: usize) -> Array3<u8> {
    // Concentric rings give edges in every orientation
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let r = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        let band = ((r / 9.0) as usize % 2) as u8;
        band * 200 + (c as u8) * 10
    })
}

fn bench_extract(c: &mut Criterion) {
    let image = synthetic_scene(640, 480);
    c.bench_function("phog_extract_640x480", |b| {
        b.iter(|| {
            let mut phog = Phog::new();
            phog.extract(black_box(image.view())).unwrap();
            black_box(phog.histogram().len())
        })
    });
}

fn bench_canny(c: &mut Criterion) {
    let gray = Array2::from_shape_fn((480, 640), |(y, x)| (((x / 16) + (y / 16)) % 2 * 180 + 20) as u8);
    let field = sobel_field(&gray);
    c.bench_function("canny_640x480", |b| {
        b.iter(|| {
            let edges = detect_edges(
                black_box(&field),
                CannyThresholds::default(),
                SuppressionMode::Legacy,
            );
            black_box(edges.dim())
        })
    });
}

fn bench_distance(c: &mut Criterion) {
    let mut a = Phog::new();
    a.extract(synthetic_scene(320, 240).view()).unwrap();
    let mut b = Phog::new();
    b.extract(synthetic_scene(240, 320).view()).unwrap();
    c.bench_function("phog_distance_l1", |bench| {
        bench.iter(|| black_box(a.distance(black_box(&b)).unwrap()))
    });
}

criterion_group!(benches, bench_extract, bench_canny, bench_distance);
criterion_main!(benches);
