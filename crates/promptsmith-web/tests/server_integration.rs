//! Integration tests for the promptsmith-web server.
//!
//! These tests start a real axum server on a random port with an in-memory
//! store and a stubbed generation service.

use promptsmith::generation::{FnService, GenerationErrorKind};
use promptsmith::history::{HISTORY_KEY, KeyValueStore, MemoryStore};
use promptsmith_web::{WebConfig, shared_session, spawn_web};
use serde_json::json;
use std::time::{Duration, Instant};

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(service: FnService) -> (MemoryStore, String) {
    let store = MemoryStore::new();
    let session = shared_session(store.clone(), service);

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };

    let addr = spawn_web(session, config).await.unwrap();
    (store, format!("http://{addr}"))
}

fn echo() -> FnService {
    FnService::new(|prompt: String| async move {
        Ok(format!("generated from {} chars", prompt.len()))
    })
}

/// Service that takes `delay` to answer.
fn slow(delay: Duration) -> FnService {
    FnService::new(move |prompt: String| async move {
        tokio::time::sleep(delay).await;
        Ok(format!("slowly generated from {} chars", prompt.len()))
    })
}

fn options(idea: &str) -> serde_json::Value {
    json!({
        "idea": idea,
        "persona": "Software Engineer",
        "tone": "Technical",
        "taskType": "Code Generation",
    })
}

async fn post(base: &str, path: &str, body: &serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(body)
        .send()
        .await
        .unwrap()
}

// ── Catalogues ───────────────────────────────────────────────────────

#[tokio::test]
async fn get_options_lists_catalogues_and_defaults() {
    let (_store, base) = spawn_test_server(echo()).await;

    let resp = reqwest::get(format!("{base}/api/options")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["personas"].as_array().unwrap().len(), 6);
    assert_eq!(json["tones"].as_array().unwrap().len(), 6);
    assert_eq!(json["taskTypes"].as_array().unwrap().len(), 15);
    assert_eq!(json["defaults"]["idea"], "");
    assert_eq!(json["defaults"]["persona"], "Software Engineer");
}

#[tokio::test]
async fn get_templates_groups_by_category() {
    let (_store, base) = spawn_test_server(echo()).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/templates"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let groups = json.as_array().unwrap();
    assert_eq!(groups.len(), 4);
    let total: usize = groups
        .iter()
        .map(|g| g["templates"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 10);
}

#[tokio::test]
async fn get_examples_returns_quick_starts() {
    let (_store, base) = spawn_test_server(echo()).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/examples"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
}

// ── Assemble / generate ──────────────────────────────────────────────

#[tokio::test]
async fn post_assemble_returns_meta_prompt() {
    let (store, base) = spawn_test_server(echo()).await;

    let resp = post(&base, "/api/assemble", &options("a CSV parser")).await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["metaPrompt"].as_str().unwrap().contains("a CSV parser"));
    // Assembly alone records nothing.
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

#[tokio::test]
async fn post_generate_records_history() {
    let (store, base) = spawn_test_server(echo()).await;

    let resp = post(&base, "/api/generate", &options("a CSV parser")).await;
    assert_eq!(resp.status(), 200);
    let entry: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(entry["idea"], "a CSV parser");
    assert!(
        entry["generatedPrompt"]
            .as_str()
            .unwrap()
            .starts_with("generated from")
    );

    let history: serde_json::Value = reqwest::get(format!("{base}/api/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], entry["id"]);

    let persisted = store.get(HISTORY_KEY).unwrap().unwrap();
    assert!(persisted.contains("a CSV parser"));

    let prefix: String = entry["id"].as_str().unwrap().chars().take(8).collect();
    let resp = reqwest::get(format!("{base}/api/history/{prefix}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let found: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(found["id"], entry["id"]);
}

#[tokio::test]
async fn post_generate_deduplicates_by_idea() {
    let (_store, base) = spawn_test_server(echo()).await;

    post(&base, "/api/generate", &options("same idea")).await;
    post(&base, "/api/generate", &options("other idea")).await;
    let resp = post(&base, "/api/generate", &options("same idea")).await;
    assert_eq!(resp.status(), 200);

    let history: serde_json::Value = reqwest::get(format!("{base}/api/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ideas: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["idea"].as_str().unwrap())
        .collect();
    assert_eq!(ideas, ["same idea", "other idea"]);
}

#[tokio::test]
async fn post_generate_rejects_empty_idea() {
    let (store, base) = spawn_test_server(echo()).await;

    let resp = post(&base, "/api/generate", &options("   ")).await;
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "empty-idea");
    assert_eq!(json["error"], "Please enter a prompt idea.");
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

#[tokio::test]
async fn post_generate_reports_classified_failure() {
    let (store, base) =
        spawn_test_server(FnService::failing(GenerationErrorKind::RateLimited)).await;

    let resp = post(&base, "/api/generate", &options("a CSV parser")).await;
    assert_eq!(resp.status(), 502);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "rate-limited");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Rate limit exceeded.")
    );
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

#[tokio::test]
async fn get_unknown_history_entry_is_404() {
    let (_store, base) = spawn_test_server(echo()).await;

    let resp = reqwest::get(format!("{base}/api/history/nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "not-found");
}

// ── Concurrency ──────────────────────────────────────────────────────

#[tokio::test]
async fn reads_and_assembly_do_not_wait_for_generation() {
    let (_store, base) = spawn_test_server(slow(Duration::from_secs(3))).await;

    let generate = {
        let base = base.clone();
        tokio::spawn(async move { post(&base, "/api/generate", &options("slow idea")).await })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;

    let start = Instant::now();
    let resp = post(&base, "/api/assemble", &options("a CSV parser")).await;
    assert_eq!(resp.status(), 200);
    let resp = reqwest::get(format!("{base}/api/history")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let history: serde_json::Value = resp.json().await.unwrap();
    assert!(
        start.elapsed() < Duration::from_secs(1),
        "blocked for {:?}",
        start.elapsed()
    );
    assert_eq!(history.as_array().unwrap().len(), 0);

    let resp = generate.await.unwrap();
    assert_eq!(resp.status(), 200);
    let history: serde_json::Value = reqwest::get(format!("{base}/api/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history[0]["idea"], "slow idea");
}
