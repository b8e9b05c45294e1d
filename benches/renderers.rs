use criterion::{criterion_group, criterion_main, Criterion};
use card_mazes::{
    canvas::RecordingCanvas,
    generators::{self, Algorithm},
    renderers::{get_wall_renderer, WallStyleParams},
    units::{CellSize, ColumnsCount, PixelOffset, RowsCount},
};
use image::{Rgb, RgbImage};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

const CELL_PIXELS: u32 = 40;
const MAZE_CELLS: usize = 20;

fn bench_style_to_image(c: &mut Criterion, style: &'static str) {
    let mut rng = XorShiftRng::seed_from_u64(7);
    let g = generators::generate_maze(RowsCount(MAZE_CELLS), ColumnsCount(MAZE_CELLS), Algorithm::Prims, &mut rng)
        .unwrap();
    let renderer = get_wall_renderer(style, None, &WallStyleParams::default()).unwrap();
    let side = MAZE_CELLS as u32 * CELL_PIXELS + 20;

    c.bench_function(&format!("{}_walls_to_image_20", style), move |b| {
        b.iter(|| {
            let mut image = RgbImage::from_pixel(side, side, Rgb([255, 255, 255]));
            renderer.draw_maze(&mut image, &mut rng, &g, PixelOffset::new(10, 10), CellSize(CELL_PIXELS));
            image
        })
    });
}

fn bench_mosaic_to_image(c: &mut Criterion) {
    bench_style_to_image(c, "mosaic");
}

fn bench_solid_to_image(c: &mut Criterion) {
    bench_style_to_image(c, "solid");
}

fn bench_snake_to_image(c: &mut Criterion) {
    bench_style_to_image(c, "snake");
}

fn bench_dotted_to_image(c: &mut Criterion) {
    bench_style_to_image(c, "dotted");
}

fn bench_snake_recording_100(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(100);
    let g = generators::generate_maze(RowsCount(100), ColumnsCount(100), Algorithm::Kruskals, &mut rng)
        .unwrap();
    let renderer = get_wall_renderer("snake", None, &WallStyleParams::default()).unwrap();

    c.bench_function("snake_walls_recorded_100", move |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new(4000, 4000);
            renderer.draw_maze(&mut canvas, &mut rng, &g, PixelOffset::default(), CellSize(CELL_PIXELS))
        })
    });
}

criterion_group!(
    benches,
    bench_mosaic_to_image,
    bench_solid_to_image,
    bench_snake_to_image,
    bench_dotted_to_image,
    bench_snake_recording_100
);
criterion_main!(benches);
