use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use facility_insights::{chat::FALLBACK_TEXT, routes, AppState, Config};

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    date: NaiveDate,
    value: f64,
}

/// Serve the full router on an ephemeral port with no chat delay.
async fn spawn_app(seed: Option<u64>) -> Result<String> {
    // ---
    spawn_with(Config {
        chat_typing_delay: Duration::ZERO,
        series_seed: seed,
        ..Config::default()
    })
    .await
}

/// Serve the full router with `config` and return its base URL.
async fn spawn_with(config: Config) -> Result<String> {
    // ---
    let app = routes::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let body: Value = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn series_has_requested_length_and_ends_today() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let url = format!("{}/api/series?days=14&baseValue=50&variance=200", base);
    let series: Vec<SeriesPoint> = Client::new().get(&url).send().await?.json().await?;

    assert_eq!(series.len(), 14);
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    assert!(series.iter().all(|p| p.value >= 0.0));

    // Tolerate a run that straddles local midnight.
    let last = series.last().unwrap().date;
    let today = Local::now().date_naive();
    assert!(last == today || last.succ_opt() == Some(today));

    Ok(())
}

#[tokio::test]
async fn seeded_series_are_reproducible() -> Result<()> {
    // ---
    let base = spawn_app(Some(99)).await?;
    let client = Client::new();
    let url = format!("{}/api/series?days=10", base);

    let first: Value = client.get(&url).send().await?.json().await?;
    let second: Value = client.get(&url).send().await?.json().await?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn series_rejects_bad_parameters() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let too_long = client
        .get(format!("{}/api/series?days=5000", base))
        .send()
        .await?;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .get(format!("{}/api/series?variance=-1", base))
        .send()
        .await?;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let empty = client
        .get(format!("{}/api/series?days=0", base))
        .send()
        .await?;
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(empty.json::<Vec<Value>>().await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn annotate_flags_points_and_rejects_empty() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();
    let url = format!("{}/api/series/annotate", base);

    let mut series: Vec<Value> = (1..=9)
        .map(|d| json!({ "date": format!("2025-01-0{d}"), "value": 100.0, "timestamp": 0 }))
        .collect();
    series.push(json!({ "date": "2025-01-10", "value": 200.0, "timestamp": 0 }));

    let out: Vec<Value> = client
        .post(&url)
        .json(&json!({ "series": series, "threshold": 150.0 }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(out.len(), 10);
    assert_eq!(out[0]["trend"], 0.0);
    assert_eq!(out[0]["status"], "normal");
    assert_eq!(out[9]["status"], "warning");
    assert_eq!(out[9]["isHigh"], true);
    assert_eq!(out[9]["average"], 110.0);

    let empty = client
        .post(&url)
        .json(&json!({ "series": [], "threshold": 1.0 }))
        .send()
        .await?;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let body: Value = empty.json().await?;
    assert!(body["error"].as_str().unwrap().contains("empty"));

    Ok(())
}

#[tokio::test]
async fn metric_presets_carry_summary() -> Result<()> {
    // ---
    let base = spawn_app(Some(5)).await?;
    let client = Client::new();

    let chart: Value = client
        .get(format!("{}/api/metrics/energy", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(chart["preset"], "energy");
    assert_eq!(chart["threshold"], 1300.0);
    assert_eq!(chart["points"].as_array().unwrap().len(), 7);
    assert_eq!(chart["summary"]["points"], 7);

    let missing = client
        .get(format!("{}/api/metrics/solar", base))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let live: Value = client
        .get(format!("{}/api/metrics/realtime?base=100&range=10", base))
        .send()
        .await?
        .json()
        .await?;
    let value = live["value"].as_f64().unwrap();
    assert!((95.0..105.0).contains(&value));

    Ok(())
}

#[tokio::test]
async fn chat_routes_by_keyword_precedence() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();
    let url = format!("{}/api/chat", base);

    let issue: Value = client
        .post(&url)
        .json(&json!({ "question": "what are the issues with energy", "page": "sustain" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(issue["kind"], "analysis");
    assert_eq!(
        issue["content"],
        "Based on the current data analysis, here are the key issues identified:"
    );

    let fallback: Value = client
        .post(&url)
        .json(&json!({ "question": "hello" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fallback, json!({ "kind": "text", "content": FALLBACK_TEXT }));

    let recs: Value = client
        .post(&url)
        .json(&json!({ "question": "Please suggest", "page": "nowhere" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(recs["issues"][0], "Review pending alerts in Command Center");

    Ok(())
}

#[tokio::test]
async fn unknown_page_matches_home() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let home: Value = client
        .get(format!("{}/api/pages/home/insights", base))
        .send()
        .await?
        .json()
        .await?;
    let xyz: Value = client
        .get(format!("{}/api/pages/xyz/insights", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(home, xyz);

    let opening: Vec<Value> = client
        .get(format!("{}/api/pages/twin/opening", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(opening[0]["kind"], "greeting");
    assert_eq!(opening[1]["kind"], "highlights");

    Ok(())
}

#[tokio::test]
async fn users_and_navigation() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let users: Vec<Value> = client
        .get(format!("{}/api/users", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["key"], "admin");

    let nav: Vec<Value> = client
        .get(format!("{}/api/users/viewer/navigation", base))
        .send()
        .await?
        .json()
        .await?;
    let paths: Vec<&str> = nav.iter().filter_map(|n| n["path"].as_str()).collect();
    assert_eq!(paths, ["/command", "/sustain"]);

    let missing = client
        .get(format!("{}/api/users/ghost", base))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn malformed_requests_get_json_errors() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let bad_days = client
        .get(format!("{}/api/series?days=abc", base))
        .send()
        .await?;
    assert_eq!(bad_days.status(), StatusCode::BAD_REQUEST);
    let body: Value = bad_days.json().await?;
    assert!(body["error"].as_str().unwrap().contains("days"));

    let no_base = client
        .get(format!("{}/api/metrics/realtime", base))
        .send()
        .await?;
    assert_eq!(no_base.status(), StatusCode::BAD_REQUEST);
    let body: Value = no_base.json().await?;
    assert!(body["error"].is_string());

    let bad_date = client
        .post(format!("{}/api/series/annotate", base))
        .json(&json!({
            "series": [{ "date": "2024-13-01", "value": 1.0, "timestamp": 0 }],
            "threshold": 1.0
        }))
        .send()
        .await?;
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);
    let body: Value = bad_date.json().await?;
    assert!(body["error"].is_string());

    let no_question = client
        .post(format!("{}/api/chat", base))
        .json(&json!({ "page": "home" }))
        .send()
        .await?;
    assert_eq!(no_question.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn annotate_rejects_out_of_order_and_negative_points() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();
    let url = format!("{}/api/series/annotate", base);

    let backwards = client
        .post(&url)
        .json(&json!({
            "series": [
                { "date": "2024-01-02", "value": 5.0, "timestamp": 0 },
                { "date": "2024-01-01", "value": 5.0, "timestamp": 0 }
            ],
            "threshold": 1.0
        }))
        .send()
        .await?;
    assert_eq!(backwards.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .post(&url)
        .json(&json!({
            "series": [{ "date": "2024-01-01", "value": -5.0, "timestamp": 0 }],
            "threshold": 1.0
        }))
        .send()
        .await?;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let fixed: Vec<Value> = client
        .post(&url)
        .json(&json!({
            "series": [{ "date": "2024-01-02", "value": 5.0, "timestamp": 0 }],
            "threshold": 1.0
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fixed[0]["timestamp"], 1_704_153_600_000_i64);

    Ok(())
}

#[tokio::test]
async fn overlapping_chat_requests_wait_independently() -> Result<()> {
    // ---
    let delay = Duration::from_millis(400);
    let base = spawn_with(Config {
        chat_typing_delay: delay,
        ..Config::default()
    })
    .await?;
    let client = Client::new();
    let url = format!("{}/api/chat", base);

    let started = Instant::now();
    let (first, second) = tokio::join!(
        client
            .post(&url)
            .json(&json!({ "question": "energy" }))
            .send(),
        client
            .post(&url)
            .json(&json!({ "question": "water" }))
            .send(),
    );
    let elapsed = started.elapsed();

    let first: Value = first?.json().await?;
    let second: Value = second?.json().await?;
    assert_eq!(first["content"], "Energy Consumption Insights:");
    assert_eq!(second["content"], "Water Usage Analysis:");

    // Both waited the full delay, but concurrently rather than back to back.
    assert!(elapsed >= delay, "replied after {:?}", elapsed);
    assert!(elapsed < delay * 2, "replies were serialized: {:?}", elapsed);

    Ok(())
}
