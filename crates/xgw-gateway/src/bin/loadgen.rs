//! xgw-loadgen — an ad-hoc producer load driver, not part of the library's
//! public contract (mirrors the role `span_generator`/`demo` play for the
//! ring-buffer crate's own workspace).
//!
//! Attaches directly to an existing set of rings and fires random orders at
//! the `incoming_orders` ring from several concurrent producer tasks,
//! retrying on backpressure with the same exponential-backoff sender the
//! gateway's HTTP handlers use.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinSet;

use xgw_gateway::adapters::batch::{send_with_backoff, SendOutcome};
use xgw_gateway::metrics::SendMetrics;
use xgw_gateway::rings::SerializedProducer;
use xgw_ring::{OrderRecord, Ring, RingPaths, STATUS_PENDING};

#[derive(Debug)]
struct ProducerStats {
    producer_id: usize,
    orders_sent: u64,
    duration: Duration,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let spool_dir = std::env::var("XGW_SPOOL_DIR").unwrap_or_else(|_| "/tmp/xgw-spool".to_string());
    let paths = RingPaths::under(&spool_dir);

    let ring = Ring::<OrderRecord>::open(&paths.incoming_orders)?;
    let producer = Arc::new(SerializedProducer::new("incoming_orders", ring));
    let metrics = Arc::new(SendMetrics::new());

    let producer_count: usize = std::env::var("XGW_LOADGEN_PRODUCERS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let max_retries: u32 = std::env::var("XGW_LOADGEN_MAX_RETRIES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    println!("=== xgw-loadgen ===");
    println!("spool dir: {spool_dir}");
    println!("producers: {producer_count}");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut join_set: JoinSet<ProducerStats> = JoinSet::new();

    for producer_id in 0..producer_count {
        let producer = Arc::clone(&producer);
        let metrics = Arc::clone(&metrics);
        let mut shutdown_rx = shutdown_rx.clone();
        join_set.spawn(async move {
            run_producer(producer_id, producer, metrics, max_retries, &mut shutdown_rx).await
        });
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("\nreceived Ctrl+C, shutting down...");
        }
        _ = tokio::time::sleep(Duration::from_secs(10)) => {
            println!("\ntimeout reached, shutting down...");
        }
    }
    shutdown_tx.send(true).expect("shutdown channel closed");

    let mut all_stats = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(stats) => all_stats.push(stats),
            Err(e) => eprintln!("producer task failed: {e}"),
        }
    }

    let total: u64 = all_stats.iter().map(|s| s.orders_sent).sum();
    println!("\n=== summary ===");
    for stats in &all_stats {
        println!(
            "producer {}: {} orders in {:.2}s",
            stats.producer_id,
            stats.orders_sent,
            stats.duration.as_secs_f64()
        );
    }
    println!("total orders sent: {total}");

    let (immediate, retried, backpressure, gave_up) = metrics.snapshot();
    println!(
        "sent_immediate={immediate} sent_after_retry={retried} backpressure_events={backpressure} gave_up={gave_up}"
    );

    Ok(())
}

async fn run_producer(
    producer_id: usize,
    producer: Arc<SerializedProducer<OrderRecord>>,
    metrics: Arc<SendMetrics>,
    max_retries: u32,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> ProducerStats {
    let start = Instant::now();
    let mut sent = 0u64;
    let mut order_id = (producer_id as u64) << 48;

    loop {
        if *shutdown_rx.borrow_and_update() {
            break;
        }

        let record = random_order(order_id, producer_id);
        order_id += 1;

        match send_with_backoff(&producer, record, max_retries).await {
            Ok(outcome) => {
                metrics.record(outcome);
                if matches!(outcome, SendOutcome::Immediate | SendOutcome::RetriedThenSucceeded { .. }) {
                    sent += 1;
                }
            }
            Err(e) => {
                eprintln!("producer {producer_id} send error: {e}");
                break;
            }
        }

        if sent % 100 == 0 {
            tokio::task::yield_now().await;
        }
    }

    ProducerStats {
        producer_id,
        orders_sent: sent,
        duration: start.elapsed(),
    }
}

fn random_order(order_id: u64, producer_id: usize) -> OrderRecord {
    let mut rng = rand::thread_rng();
    let order_type = rng.gen_range(0..=1u8);
    let price = if order_type == 1 { rng.gen_range(1..10_000u64) } else { 0 };

    OrderRecord {
        order_id,
        price,
        timestamp: order_id + 1,
        user_id: producer_id as u64 + 1,
        shares_qty: rng.gen_range(1..1_000u32),
        symbol: rng.gen_range(1..50u32),
        side: rng.gen_range(0..=1u8),
        order_type,
        status: STATUS_PENDING,
    }
}
