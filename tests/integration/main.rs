//! Big Tac integration test harness.
//!
//! Each test starts its own relay in-process on an ephemeral port and talks
//! to it over real HTTP, the same way game clients do:
//!
//!   cargo test --test integration
//!
//! Relays are independent; tests can run in parallel.

mod play;
mod sessions;

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use bigtac_api::ApiState;
use bigtac_services::Coordinator;

// ── Harness ───────────────────────────────────────────────────────────────────

/// A running relay. Stops when dropped.
pub struct Relay {
    pub base: String,
    pub coordinator: Coordinator,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Relay {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Shut the coordinator down, then stop the server and wait for it.
    pub async fn shutdown(mut self) -> Result<()> {
        self.coordinator.shutdown();
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            tokio::time::timeout(Duration::from_secs(5), task)
                .await
                .context("relay did not stop")??;
        }
        Ok(())
    }
}

impl Drop for Relay {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Start a relay with the given default wait bound.
pub async fn spawn_relay(default_timeout: Option<Duration>) -> Result<Relay> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    let coordinator = Coordinator::new();
    let state = ApiState::new(coordinator.clone(), default_timeout);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let stop = async move {
            let _ = stop_rx.await;
        };
        if let Err(e) = bigtac_api::serve_on(listener, state, stop).await {
            eprintln!("relay failed: {e}");
        }
    });

    Ok(Relay {
        base: format!("http://{addr}"),
        coordinator,
        stop: Some(stop_tx),
        task: Some(task),
    })
}

/// POST a JSON body. Returns the status code and the body, parsed as JSON
/// when it is JSON and wrapped in a string value otherwise.
pub async fn post(relay: &Relay, path: &str, body: Value) -> Result<(u16, Value)> {
    let resp = reqwest::Client::new()
        .post(relay.url(path))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("POST {path} failed"))?;
    read(resp).await
}

pub async fn get(relay: &Relay, path: &str) -> Result<(u16, Value)> {
    let resp = reqwest::get(relay.url(path))
        .await
        .with_context(|| format!("GET {path} failed"))?;
    read(resp).await
}

async fn read(resp: reqwest::Response) -> Result<(u16, Value)> {
    let status = resp.status().as_u16();
    let text = resp.text().await.context("failed to read body")?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok((status, body))
}

/// Create a game and return its id.
pub async fn create(relay: &Relay, player: &str) -> Result<u64> {
    let (status, body) = post(relay, "/create", serde_json::json!({ "player": player })).await?;
    anyhow::ensure!(status == 200, "create failed: {status} {body}");
    body["game_id"].as_u64().context("create response has no game_id")
}

/// Create a game for `first` and have `second` join it.
pub async fn create_and_join(relay: &Relay, first: &str, second: &str) -> Result<u64> {
    let game_id = create(relay, first).await?;
    let (status, body) = post(
        relay,
        "/join",
        serde_json::json!({ "game_id": game_id, "player": second }),
    )
    .await?;
    anyhow::ensure!(status == 200, "join failed: {status} {body}");
    Ok(game_id)
}

pub fn move_body(game_id: u64, player: u8, mv: &str, game_over: bool) -> Value {
    serde_json::json!({
        "game_id": game_id,
        "player": player,
        "move": mv,
        "game_over": game_over,
    })
}

/// True if `handle` is still running after a short grace period.
pub async fn still_blocked<T>(handle: &JoinHandle<T>) -> bool {
    tokio::time::sleep(Duration::from_millis(100)).await;
    !handle.is_finished()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_banner() {
    let relay = spawn_relay(None).await.unwrap();
    let (status, body) = get(&relay, "/").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body, Value::String("Big Tac Toe".into()));
}
