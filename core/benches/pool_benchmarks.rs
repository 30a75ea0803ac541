//! Ticket pool benchmarks
//!
//! Measures the cost of the operations executed under the pool lock:
//! - a single production batch
//! - a single consumption batch
//! - a full fill/drain cycle of a large pool
//!
//! Run with: `cargo bench -p ticket-pool-core`

#![allow(missing_docs)] // Benchmarks don't need extensive docs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ticket_pool_core::{AddOutcome, PoolConfig, PoolKind, TicketPool};

fn large_pool() -> TicketPool {
    TicketPool::with_config(PoolKind::Normal, PoolConfig::new(u32::MAX, 7, 5, 1_000))
}

fn benchmark_single_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_batch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_tickets", |b| {
        let mut pool = large_pool();
        b.iter(|| {
            if pool.is_at_max_capacity() {
                pool.retrieve_tickets();
            }
            black_box(pool.add_tickets())
        });
    });

    group.bench_function("retrieve_tickets", |b| {
        let mut pool = large_pool();
        b.iter(|| {
            if pool.current_tickets() == 0 {
                pool.add_tickets();
            }
            black_box(pool.retrieve_tickets())
        });
    });

    group.bench_function("status", |b| {
        let pool = large_pool();
        b.iter(|| black_box(pool.status()));
    });

    group.finish();
}

fn benchmark_fill_drain_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_drain_cycle");

    group.bench_function("capacity_1000", |b| {
        b.iter(|| {
            let mut pool = large_pool();
            while let AddOutcome::Added(_) = pool.add_tickets() {}
            let mut sold = 0_u64;
            loop {
                let batch = pool.retrieve_tickets();
                if batch == 0 {
                    break;
                }
                sold += u64::from(batch);
            }
            black_box(sold)
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_batch, benchmark_fill_drain_cycle);
criterion_main!(benches);
