use collide3d::{build_hull, SatTester};
use criterion::{criterion_group, criterion_main, Criterion};
use glam::DVec3;

fn cube_points(origin: DVec3) -> Vec<DVec3> {
    // The first four points must form a non-degenerate seed tetrahedron;
    // a plain x/y/z nested loop would push four coplanar corners first.
    let corners = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 1.0, 0.0),
        (1.0, 0.0, 1.0),
        (0.0, 1.0, 1.0),
        (1.0, 1.0, 1.0),
    ];
    corners
        .into_iter()
        .map(|(x, y, z)| origin + DVec3::new(x, y, z))
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    env_logger::init();

    let a = build_hull(&cube_points(DVec3::ZERO), false).unwrap();
    let b = build_hull(&cube_points(DVec3::new(0.5, 0.25, -0.1)), false).unwrap();

    c.bench_function("overlapping_cubes_hit_test", |bencher| {
        bencher.iter(|| criterion::black_box(SatTester::new(&a, &b, 80).hit_test()));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
