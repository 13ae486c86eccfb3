use crate::*;

/// /status lists every session with its state.
#[tokio::test]
async fn test_status_lists_sessions() {
    let relay = spawn_relay(None).await.unwrap();
    let waiting = create(&relay, "Alice").await.unwrap();
    let active = create_and_join(&relay, "Carol", "Dave").await.unwrap();

    let (status, body) = get(&relay, "/status").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["session_count"], 2);
    assert_eq!(body["shutting_down"], false);

    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions[0]["game_id"], waiting);
    assert_eq!(sessions[0]["state"], "waiting");
    assert!(sessions[0]["second"].is_null());
    assert_eq!(sessions[1]["game_id"], active);
    assert_eq!(sessions[1]["state"], "active");
    assert_eq!(sessions[1]["second"], "Dave");
}

/// /sessions/{id} shows one session; unknown ids are 404.
#[tokio::test]
async fn test_session_inspect() {
    let relay = spawn_relay(None).await.unwrap();
    let game_id = create_and_join(&relay, "Alice", "Bob").await.unwrap();

    let (status, body) = get(&relay, &format!("/sessions/{game_id}")).await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["first"], "Alice");
    assert_eq!(body["second"], "Bob");
    assert_eq!(body["moves"], 0);

    let (status, _) = get(&relay, "/sessions/999").await.unwrap();
    assert_eq!(status, 404);
}

/// Ids are unique across concurrent creates, and each one is joinable at
/// once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates() {
    let relay = spawn_relay(None).await.unwrap();

    let mut creates = tokio::task::JoinSet::new();
    for n in 0..32 {
        let base = relay.base.clone();
        creates.spawn(async move {
            let client = reqwest::Client::new();
            let created: Value = client
                .post(format!("{base}/create"))
                .json(&serde_json::json!({ "player": format!("p{n}") }))
                .send()
                .await?
                .json()
                .await?;
            let game_id = created["game_id"].as_u64().unwrap_or_default();
            let joined = client
                .post(format!("{base}/join"))
                .json(&serde_json::json!({ "game_id": game_id, "player": "guest" }))
                .send()
                .await?;
            Ok::<_, reqwest::Error>((game_id, joined.status().as_u16()))
        });
    }

    let mut ids = std::collections::HashSet::new();
    while let Some(done) = creates.join_next().await {
        let (game_id, join_status) = done.unwrap().unwrap();
        assert_eq!(join_status, 200, "fresh game {game_id} was not joinable");
        assert!(ids.insert(game_id), "game id {game_id} handed out twice");
    }
    assert_eq!(ids.len(), 32);
    assert_eq!(relay.coordinator.registry().len(), 32);
}
