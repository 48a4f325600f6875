use cp_core::grid::Grid;
use cp_raster::fill::{flood_fill, scanline_fill};
use cp_raster::raster::{draw_circle, draw_line};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn maze(width: i32, height: i32) -> Grid {
    let Ok(mut grid) = Grid::new(width, height, '.') else {
        panic!("bench grid");
    };
    for x in (4..width).step_by(8) {
        draw_line(&mut grid, x, 0, x, height - 3, &'#');
        draw_line(&mut grid, x + 4, 2, x + 4, height - 1, &'#');
    }
    draw_circle(&mut grid, width / 2, height / 2, height / 3, &'#', false);
    grid
}

fn bench_fills(c: &mut Criterion) {
    let base = maze(200, 80);

    c.bench_function("flood_fill_200x80", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            let _ = flood_fill(black_box(&mut grid), 0, 0, 'o');
            grid
        });
    });

    c.bench_function("scanline_fill_200x80", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            let _ = scanline_fill(black_box(&mut grid), 0, 0, 'o');
            grid
        });
    });
}

criterion_group!(benches, bench_fills);
criterion_main!(benches);
