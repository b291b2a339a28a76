use criterion::{black_box, criterion_group, criterion_main, Criterion};

use softraster::factory::{create_canvas, create_linear_gradient};
use softraster::path_storage::PathDirection;
use softraster::{Bitmap, Color, Paint, PathBuilder, Point, Rect, TileMode};

const SIZE: u32 = 512;

fn star(cx: f32, cy: f32, r: f32, points: usize) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let a = i as f32 * std::f32::consts::PI * 4.0 / points as f32;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

fn bench_path(c: &mut Criterion) {
    let mut builder = PathBuilder::new();
    builder
        .add_polygon(&star(256.0, 256.0, 240.0, 11))
        .add_circle(Point::new(256.0, 256.0), 120.0, PathDirection::CounterClockwise);
    let path = builder.build();
    let mut bm = Bitmap::new(SIZE, SIZE);

    c.bench_function("fill_path star+circle", |b| {
        b.iter(|| {
            let mut canvas = create_canvas(&mut bm);
            let mut paint = Paint::from_color(Color::new(0.2, 0.4, 0.8, 0.7));
            canvas.fill_path(black_box(&path), &mut paint);
        })
    });
}

fn bench_gradient(c: &mut Criterion) {
    let colors = [
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.0, 1.0, 0.0),
        Color::rgb(0.0, 0.0, 1.0),
    ];
    let mut bm = Bitmap::new(SIZE, SIZE);

    c.bench_function("fill_rect rotated gradient", |b| {
        b.iter(|| {
            let mut shader =
                create_linear_gradient(Point::new(0.0, 0.0), Point::new(300.0, 200.0), &colors, TileMode::Mirror)
                    .unwrap();
            let mut canvas = create_canvas(&mut bm);
            canvas.translate(256.0, 256.0);
            canvas.rotate(0.3);
            canvas.fill_rect(&Rect::from_ltrb(-300.0, -300.0, 300.0, 300.0), &mut Paint::from_shader(&mut shader));
        })
    });
}

fn bench_mesh(c: &mut Criterion) {
    let verts = [
        Point::new(10.0, 20.0),
        Point::new(490.0, 5.0),
        Point::new(500.0, 500.0),
        Point::new(0.0, 480.0),
    ];
    let colors = [Color::WHITE, Color::rgb(1.0, 0.5, 0.0), Color::BLACK, Color::rgb(0.0, 0.5, 1.0)];
    let mut bm = Bitmap::new(SIZE, SIZE);

    c.bench_function("draw_quad level 8", |b| {
        b.iter(|| {
            let mut canvas = create_canvas(&mut bm);
            canvas.draw_quad(&verts, Some(&colors), None, black_box(8), &mut Paint::default());
        })
    });
}

criterion_group!(benches, bench_path, bench_gradient, bench_mesh);
criterion_main!(benches);
