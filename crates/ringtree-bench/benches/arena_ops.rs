//! Criterion micro-benchmarks for arena growth, zeroing, and subtree removal.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ringtree_arena::{Arena, ArenaConfig};

/// A binary arena of `u64` slots allocated to `rings` rings.
fn make_arena(rings: u32) -> Arena<u64> {
    let config = ArenaConfig::binary().with_initial_rings(rings);
    let mut arena = Arena::new(&config).unwrap();
    arena.resolve(0).unwrap();
    arena
}

/// Benchmark: grow an empty binary arena ring by ring up to 16 rings.
fn bench_arena_grow_16_rings(c: &mut Criterion) {
    c.bench_function("arena_grow_16_rings", |b| {
        b.iter(|| {
            let mut arena: Arena<u64> =
                Arena::new(&ArenaConfig::binary().with_initial_rings(1)).unwrap();
            for ring in 1..=16 {
                arena.ensure(ring, arena.stride()).unwrap();
            }
            black_box(arena.capacity());
        });
    });
}

/// Benchmark: single grow-on-access jump from 3 rings to 16.
fn bench_arena_resolve_deep(c: &mut Criterion) {
    c.bench_function("arena_resolve_deep", |b| {
        b.iter(|| {
            let mut arena = make_arena(3);
            *arena.resolve((1 << 16) - 2).unwrap() = 1;
            black_box(arena.capacity());
        });
    });
}

/// Benchmark: zero a 64K-slot arena in place.
fn bench_arena_zero_64k(c: &mut Criterion) {
    let mut arena = make_arena(16);
    c.bench_function("arena_zero_64k", |b| {
        b.iter(|| {
            arena.zero();
            black_box(arena.epoch());
        });
    });
}

/// Benchmark: remove the subtree under slot 1 (half of a 64K-slot arena).
fn bench_arena_remove_half(c: &mut Criterion) {
    let mut arena = make_arena(16);
    c.bench_function("arena_remove_half", |b| {
        b.iter(|| {
            let cleared = arena.remove(black_box(1));
            black_box(cleared);
        });
    });
}

criterion_group!(
    benches,
    bench_arena_grow_16_rings,
    bench_arena_resolve_deep,
    bench_arena_zero_64k,
    bench_arena_remove_half
);
criterion_main!(benches);
