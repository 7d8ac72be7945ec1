//! Load test — concurrent collectors hitting `/api/chat` with a mix of questions.
//! Run with the gateway up: cargo run --bin load_test
//! Target defaults to http://127.0.0.1:5000; override with WENJIAN_BASE_URL.

use reqwest::Client;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const CONCURRENT_COLLECTORS: usize = 10;
const REQUESTS_PER_COLLECTOR: usize = 5;

// One question per reply path, plus an empty message that must come back 400.
const QUESTIONS: &[&str] = &[
    "这件青花瓷是明代的吗？",
    "这件青铜器是真的吗",
    "这幅国画怎么看年代",
    "古玉的沁色怎么判断",
    "帮我鉴定一下真伪",
    "你好",
    "谢谢你的解答",
    "随便说点什么",
    "",
];

#[tokio::main]
async fn main() {
    let base_url = std::env::var("WENJIAN_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!(
        "[LOAD TEST] Starting — {} collectors × {} requests = {} total",
        CONCURRENT_COLLECTORS,
        REQUESTS_PER_COLLECTOR,
        CONCURRENT_COLLECTORS * REQUESTS_PER_COLLECTOR
    );
    println!("[LOAD TEST] Target: {} (ensure gateway is running)", base_url);

    let expected = Arc::new(AtomicU32::new(0));
    let unexpected = Arc::new(AtomicU32::new(0));
    let latencies: Arc<RwLock<Vec<u64>>> = Arc::new(RwLock::new(Vec::new()));

    let client = Client::new();

    let mut handles = Vec::new();
    for collector in 0..CONCURRENT_COLLECTORS {
        let client = client.clone();
        let base_url = base_url.clone();
        let expected = Arc::clone(&expected);
        let unexpected = Arc::clone(&unexpected);
        let latencies = Arc::clone(&latencies);

        let h = tokio::spawn(async move {
            for r in 0..REQUESTS_PER_COLLECTOR {
                let question = QUESTIONS[(collector + r) % QUESTIONS.len()];
                let body = json!({
                    "message": question,
                    "user_id": format!("collector-{}", collector),
                });

                let start = Instant::now();
                let res = client
                    .post(format!("{}/api/chat", base_url))
                    .json(&body)
                    .send()
                    .await;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                let want = if question.is_empty() { 400 } else { 200 };
                match res {
                    Ok(resp) if resp.status().as_u16() == want => {
                        expected.fetch_add(1, Ordering::Relaxed);
                        latencies.write().await.push(elapsed_ms);
                    }
                    _ => {
                        unexpected.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });
        handles.push(h);
    }

    for h in handles {
        let _ = h.await;
    }

    let ok = expected.load(Ordering::Relaxed);
    let bad = unexpected.load(Ordering::Relaxed);
    let total = ok + bad;
    let success_rate = if total > 0 { (ok as f64 / total as f64) * 100.0 } else { 0.0 };
    let latencies_guard = latencies.read().await;
    let avg_latency_ms = if latencies_guard.is_empty() {
        0.0
    } else {
        latencies_guard.iter().sum::<u64>() as f64 / latencies_guard.len() as f64
    };

    println!(
        "[LOAD TEST] Expected status: {:.1}% | Average Latency: {:.0}ms",
        success_rate, avg_latency_ms
    );
    println!("[LOAD TEST] Total: {} | Expected: {} | Unexpected: {}", total, ok, bad);
}
