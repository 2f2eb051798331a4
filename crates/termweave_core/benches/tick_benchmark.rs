//! # Tick Performance Benchmark
//!
//! The runtime targets full-screen terminal UIs: thousands of entities,
//! hundreds of colliders, 60 ticks per second. The broad phase is O(n²)
//! over colliders by design - this benchmark keeps that trade honest.
//!
//! Run with: `cargo bench --package termweave_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use termweave_core::{Collider, InteractionSystem, Position, Query, Velocity, World};
use termweave_shared::constants::{MAX_ENTITIES, TICK_DELTA};

/// Benchmark: create a world at the default capacity.
fn bench_world_creation(c: &mut Criterion) {
    c.bench_function("world_creation_default", |b| {
        b.iter(|| black_box(World::new(MAX_ENTITIES)));
    });
}

/// Benchmark: spawn entities with two components attached.
fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_with_components");

    for count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut world = World::new(count);
                for i in 0..count {
                    let id = world.spawn().unwrap();
                    world
                        .ensure_component(id, Position::new(i as f32, 0.0))
                        .unwrap();
                    world.ensure_component(id, Velocity::new(1.0, 0.0)).unwrap();
                }
                world.alive_count()
            });
        });
    }

    group.finish();
}

/// Benchmark: query over a world where half the entities match.
fn bench_query(c: &mut Criterion) {
    let mut world = World::new(MAX_ENTITIES);
    for i in 0..MAX_ENTITIES {
        let id = world.spawn().unwrap();
        world.ensure_component(id, Position::default()).unwrap();
        if i % 2 == 0 {
            world.ensure_component(id, Velocity::default()).unwrap();
        }
    }

    let movable = Query::new().with::<Position>().with::<Velocity>();
    c.bench_function("query_half_matching_10k", |b| {
        b.iter(|| black_box(world.query(&movable)).len());
    });
}

/// Benchmark: one interaction tick over a grid of colliders.
///
/// The grid spaces colliders so only neighbors overlap, which is the
/// realistic shape of a widget screen: many colliders, few contacts.
fn bench_interaction_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction_tick");

    for count in [50usize, 200, 500] {
        let mut world = World::new(count.max(1));
        for i in 0..count {
            let id = world.spawn().unwrap();
            let x = (i % 25) as f32 * 3.0;
            let y = (i / 25) as f32 * 3.0;
            world.ensure_component(id, Position::new(x, y)).unwrap();
            world.ensure_component(id, Collider::new(4.0, 4.0)).unwrap();
        }
        let mut system = InteractionSystem::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &count,
            |b, _| {
                b.iter(|| system.tick(&mut world).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark: a movement pass over every entity, the per-tick floor.
fn bench_movement_pass(c: &mut Criterion) {
    let mut world = World::new(MAX_ENTITIES);
    for _ in 0..MAX_ENTITIES {
        let id = world.spawn().unwrap();
        world.ensure_component(id, Position::default()).unwrap();
        world.ensure_component(id, Velocity::new(1.0, 1.0)).unwrap();
    }
    let movable = Query::new().with::<Position>().with::<Velocity>();

    c.bench_function("movement_pass_10k", |b| {
        b.iter(|| {
            for id in world.query(&movable) {
                let velocity = *world.get::<Velocity>(id).unwrap();
                let position = world.get_mut::<Position>(id).unwrap();
                position.x += velocity.x * TICK_DELTA;
                position.y += velocity.y * TICK_DELTA;
            }
        });
    });
}

criterion_group!(
    benches,
    bench_world_creation,
    bench_spawn,
    bench_query,
    bench_interaction_tick,
    bench_movement_pass,
);
criterion_main!(benches);
