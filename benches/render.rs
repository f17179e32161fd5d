use criterion::{criterion_group, criterion_main, Criterion};
use fractals::{render, ColorModel, Fractal, Rect, RenderRequest};

fn mandelbrot_overview(c: &mut Criterion) {
    let rect = Rect::from_extent(-2.0, -1.5, 3.0, 3.0).unwrap();
    let request = RenderRequest::new(
        Fractal::Mandelbrot { threshold: 2.0 },
        ColorModel::Greyscale,
        rect,
        200,
        400,
    );
    let threads = num_cpus::get();

    c.bench_function("mandelbrot 400x400, 1 worker", |b| {
        b.iter(|| render(&request, 1))
    });
    c.bench_function(&format!("mandelbrot 400x400, {} workers", threads), |b| {
        b.iter(|| render(&request, threads))
    });
}

criterion_group!(benches, mandelbrot_overview);
criterion_main!(benches);
