use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use shapeyard_common::{Bounds, Model, ModelHandle, Pose};
use shapeyard_scene::{SceneRegistry, ShapeKind, ShapeSet};

fn bench_shapes() -> ShapeSet {
    let model = |handle: u64| Model {
        handle: ModelHandle(handle),
        bounds: Bounds::from_dimensions(Vec3::splat(0.1)),
    };
    ShapeSet::new(model(1), model(2), model(3))
}

fn make_registry(entity_count: usize) -> SceneRegistry {
    let mut registry = SceneRegistry::new(bench_shapes());
    for i in 0..entity_count {
        let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
        registry.create(kind, Pose::IDENTITY);
    }
    registry
}

fn bench_create(entity_count: usize, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let registry = make_registry(black_box(entity_count));
        black_box(registry.len());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  create ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_iterate(entity_count: usize, iterations: usize) {
    let registry = make_registry(entity_count);

    let start = Instant::now();
    for _ in 0..iterations {
        let visited = black_box(&registry).iter().count();
        black_box(visited);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  iterate ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_get(entity_count: usize, iterations: usize) {
    let mut registry = SceneRegistry::new(bench_shapes());
    let mut ids = Vec::with_capacity(entity_count);
    for i in 0..entity_count {
        let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
        ids.push(registry.create(kind, Pose::IDENTITY));
    }

    let start = Instant::now();
    for i in 0..iterations {
        let id = ids[i % ids.len()];
        let _ = black_box(registry.get(black_box(id)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  get ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_churn(entity_count: usize, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let mut registry = SceneRegistry::new(bench_shapes());
        let mut ids = Vec::with_capacity(entity_count);
        for i in 0..entity_count {
            let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
            ids.push(registry.create(kind, Pose::IDENTITY));
        }
        // Remove every other entity, then refill
        for id in ids.iter().step_by(2) {
            let _ = registry.remove(black_box(*id));
        }
        for _ in 0..entity_count / 2 {
            registry.create(ShapeKind::Ball, Pose::IDENTITY);
        }
        black_box(registry.len());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  churn ({entity_count} entities, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Scene Registry Benchmarks ===\n");

    println!("Create:");
    bench_create(100, 1000);
    bench_create(1000, 100);
    bench_create(10000, 10);

    println!("\nOrdered iteration:");
    bench_iterate(100, 10000);
    bench_iterate(1000, 1000);
    bench_iterate(10000, 100);

    println!("\nLookup by id:");
    bench_get(1000, 100000);
    bench_get(10000, 100000);

    println!("\nRemove/create churn:");
    bench_churn(100, 1000);
    bench_churn(1000, 100);

    println!("\n=== Done ===");
}
