//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release -- --nocapture bench

use std::time::Instant;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::json;
use tempfile::TempDir;

use pc_catalog::database::Store;
use pc_catalog::handler::{create_pc, list_pcs};
use pc_catalog::route::AppState;
use pc_catalog::static_files::StaticFiles;

fn setup_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("bench.db")).unwrap();
    let assets = StaticFiles::new(dir.path()).unwrap();
    (AppState::new(store, assets), dir)
}

fn payload(id: &str) -> Result<Bytes, axum::extract::rejection::BytesRejection> {
    Ok(Bytes::from(
        json!({
            "id": id,
            "name": "Bench rig",
            "cpu": "i9",
            "ram": "64",
            "storage": "2048",
            "purpose": "benchmark"
        })
        .to_string(),
    ))
}

async fn create(state: &AppState, id: &str) {
    let (status, _) = create_pc(State(state.clone()), payload(id)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

fn report(name: &str, iterations: usize, duration: std::time::Duration) {
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[tokio::test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
async fn bench_create_pcs() {
    println!("\n=== Benchmark: Create PCs ===\n");

    let (state, _dir) = setup_state();
    let iterations = 1000;

    let start = Instant::now();
    for i in 0..iterations {
        create(&state, &format!("bench-{i}")).await;
    }
    report("Create", iterations, start.elapsed());
}

#[tokio::test]
#[ignore]
async fn bench_list_pcs() {
    println!("\n=== Benchmark: List PCs ===\n");

    let (state, _dir) = setup_state();

    println!("  Preparing: Creating 1000 PCs...");
    for i in 0..1000 {
        create(&state, &format!("list-{i}")).await;
    }
    println!("  Done!\n");

    let iterations = 200;
    let start = Instant::now();
    for _ in 0..iterations {
        let Json(records) = list_pcs(State(state.clone())).await.unwrap();
        assert_eq!(records.len(), 1000);
    }
    report("List 1000 records", iterations, start.elapsed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn bench_concurrent_creates() {
    println!("\n=== Benchmark: Concurrent Creates ===\n");

    let (state, _dir) = setup_state();
    let num_tasks = 50;
    let ops_per_task = 20;

    println!("  Running {} concurrent tasks with {} ops each...", num_tasks, ops_per_task);

    let start = Instant::now();
    let handles: Vec<_> = (0..num_tasks)
        .map(|task_id| {
            let state = state.clone();
            tokio::spawn(async move {
                for op_id in 0..ops_per_task {
                    let id = format!("concurrent-{task_id}-{op_id}");
                    create(&state, &id).await;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    report("Concurrent create", num_tasks * ops_per_task, start.elapsed());
}

#[test]
fn bench_summary() {
    println!("\n{}", "=".repeat(60));
    println!("Benchmark Test Suite");
    println!("{}", "=".repeat(60));
    println!("\nTo run benchmarks, use:");
    println!("  cargo test --release bench -- --ignored --nocapture");
    println!("\nAvailable benchmarks:");
    println!("  • bench_create_pcs          - Record creation performance");
    println!("  • bench_list_pcs            - Listing a populated store");
    println!("  • bench_concurrent_creates  - Parallel writers on one database");
    println!("\n{}\n", "=".repeat(60));
}
