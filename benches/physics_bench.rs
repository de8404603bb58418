use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use impulse2d::*;
use std::hint::black_box;

fn prepare_world(body_count: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::default();
    world.add_body(
        RigidBody::new(
            Shape::rectangle(900.0, 20.0).unwrap(),
            Vec2::new(500.0, 950.0),
            Material::default().with_density(0.0),
        )
        .unwrap(),
    );
    let columns = 30;
    for i in 0..body_count {
        let x = 60.0 + (i % columns) as f32 * 28.0;
        let y = 100.0 + (i / columns) as f32 * 28.0;
        let shape = if i % 2 == 0 {
            Shape::circle(10.0).unwrap()
        } else {
            Shape::regular_polygon(3 + i % 5, 10.0).unwrap()
        };
        world.add_body(RigidBody::new(shape, Vec2::new(x, y), Material::default()).unwrap());
    }
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &count in &[64usize, 256, 512] {
        group.bench_with_input(BenchmarkId::new("settling", count), &count, |b, &count| {
            b.iter(|| {
                let mut world = prepare_world(count);
                for _ in 0..10 {
                    world.step_with_dt(black_box(1.0 / 60.0));
                }
                black_box(world.contacts().len())
            })
        });
    }
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    let world = prepare_world(900);
    group.bench_function("rebuild_and_pairs", |b| {
        let mut broadphase = BroadPhase::new(world.config().bounds);
        b.iter(|| black_box(broadphase.get_potential_pairs(world.bodies()).len()))
    });

    let mut broadphase = BroadPhase::new(world.config().bounds);
    broadphase.rebuild(world.bodies());
    let query = BoundingBox::new(Vec2::new(200.0, 200.0), Vec2::new(400.0, 400.0));
    group.bench_function("query", |b| {
        b.iter(|| black_box(broadphase.tree().query(black_box(&query)).len()))
    });
    group.finish();
}

fn bench_narrowphase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrowphase");
    let count = 1000;
    let narrowphase = NarrowPhase::default();

    let make_pairs = |shape: Shape| -> Vec<(RigidBody, RigidBody)> {
        (0..count)
            .map(|i| {
                let angle = i as f32 * 0.01;
                let a = RigidBody::new(shape.clone(), Vec2::ZERO, Material::default())
                    .unwrap()
                    .with_orientation(angle);
                let b = RigidBody::new(shape.clone(), Vec2::new(1.6, 0.3), Material::default())
                    .unwrap()
                    .with_orientation(-angle);
                (a, b)
            })
            .collect()
    };

    for (name, shape) in [
        ("circle_circle", Shape::circle(1.0).unwrap()),
        ("polygon_polygon", Shape::rectangle(2.0, 2.0).unwrap()),
        ("hexagon_hexagon", Shape::regular_polygon(6, 1.0).unwrap()),
    ] {
        let pairs = make_pairs(shape);
        group.bench_function(name, |b| {
            b.iter(|| {
                for (lhs, rhs) in &pairs {
                    black_box(narrowphase.collide(lhs, rhs));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_world_step, bench_quadtree, bench_narrowphase);
criterion_main!(benches);
