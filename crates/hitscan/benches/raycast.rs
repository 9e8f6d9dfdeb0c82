use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hitscan::{
    query, Capsule, CapsuleAxis, Entry, MeshCollider, OrientedBox, QueryOptions, Ray, ScanMode,
    Shape, Sphere, TriangleMesh,
};
use hitscan_math::{Point3, Transform, Vec3};

/// Grid of `n` vertices per side in the z = 0 plane.
fn grid_mesh(n: u32) -> TriangleMesh {
    let mut vertices = Vec::new();
    for y in 0..n {
        for x in 0..n {
            vertices.push(Point3::new(x as f64, y as f64, 0.0));
        }
    }
    let mut indices = Vec::new();
    for y in 0..n - 1 {
        for x in 0..n - 1 {
            let i = y * n + x;
            indices.extend_from_slice(&[i, i + 1, i + n, i + 1, i + n + 1, i + n]);
        }
    }
    TriangleMesh::new(vertices, indices)
}

fn mixed_scene(count: usize) -> Vec<Entry<usize>> {
    let mesh = Arc::new(grid_mesh(16));
    (0..count)
        .map(|i| {
            let transform = Transform::translation(
                (i % 32) as f64 * 3.0,
                (i / 32) as f64 * 3.0,
                0.0,
            );
            let entry = match i % 4 {
                0 => Entry::new(i, Sphere::new(1.0)),
                1 => Entry::new(i, OrientedBox::new(Vec3::new(1.0, 1.0, 1.0))),
                2 => Entry::new(i, Capsule::new(2.0, 0.5, CapsuleAxis::Up)),
                _ => Entry::new(i, Shape::TriangleMesh(MeshCollider::new(mesh.clone()))),
            };
            entry.with_transform(transform).with_layer((i % 3) as i32)
        })
        .collect()
}

fn bench_query(c: &mut Criterion) {
    let scene = mixed_scene(1024);
    let ray = Ray::new(Point3::new(-5.0, 7.5, 0.25), Vec3::new(1.0, 0.02, 0.0));

    c.bench_function("query_sequential_1024", |b| {
        let options = QueryOptions::new().any_layer();
        b.iter(|| query(black_box(&scene), black_box(&ray), &options))
    });

    c.bench_function("query_parallel_1024", |b| {
        let options = QueryOptions::new().any_layer().with_scan(ScanMode::Parallel);
        b.iter(|| query(black_box(&scene), black_box(&ray), &options))
    });
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
