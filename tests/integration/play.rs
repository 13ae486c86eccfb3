use crate::*;

/// Create, wait and join: the waiting creator learns the joiner's name and
/// the joiner learns the creator's.
#[tokio::test]
async fn test_create_wait_join() {
    let relay = spawn_relay(None).await.unwrap();
    let game_id = create(&relay, "Alice").await.unwrap();

    let waiter = {
        let url = relay.url("/wait");
        tokio::spawn(async move {
            reqwest::Client::new()
                .post(url)
                .json(&serde_json::json!({ "game_id": game_id }))
                .send()
                .await?
                .json::<Value>()
                .await
        })
    };
    assert!(still_blocked(&waiter).await, "/wait returned before anyone joined");

    let (status, body) = post(
        &relay,
        "/join",
        serde_json::json!({ "game_id": game_id, "player": "Bob" }),
    )
    .await
    .unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["opponent"], "Alice");

    let waited = waiter.await.unwrap().unwrap();
    assert_eq!(waited["opponent"], "Bob");
    assert_eq!(waited["game_id"], game_id);
}

/// Moves alternate: each side's /move returns the other side's move.
#[tokio::test]
async fn test_moves_round_trip() {
    let relay = spawn_relay(Some(Duration::from_secs(10))).await.unwrap();
    let game_id = create_and_join(&relay, "Alice", "Bob").await.unwrap();

    let first = {
        let url = relay.url("/move");
        tokio::spawn(async move {
            reqwest::Client::new()
                .post(url)
                .json(&move_body(game_id, 0, "e2e4", false))
                .send()
                .await?
                .json::<Value>()
                .await
        })
    };
    assert!(still_blocked(&first).await, "player 0 got a reply before player 1 moved");

    let second = {
        let url = relay.url("/move");
        tokio::spawn(async move {
            reqwest::Client::new()
                .post(url)
                .json(&move_body(game_id, 1, "e7e5", false))
                .send()
                .await?
                .json::<Value>()
                .await
        })
    };

    let reply_to_first = first.await.unwrap().unwrap();
    assert_eq!(reply_to_first["reply"], "e7e5");
    assert_eq!(reply_to_first["game_over"], false);

    let reply_to_second = second.await.unwrap().unwrap();
    assert_eq!(reply_to_second["reply"], "e2e4");

    // Next exchange: player 1 waits, player 0 ends the game.
    let waiting = {
        let url = relay.url("/move");
        tokio::spawn(async move {
            reqwest::Client::new()
                .post(url)
                .json(&move_body(game_id, 1, "Nc6", false))
                .send()
                .await?
                .json::<Value>()
                .await
        })
    };
    assert!(still_blocked(&waiting).await);
    let (status, body) = post(&relay, "/move", move_body(game_id, 0, "Qh5#", true))
        .await
        .unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["game_over"], true);
    assert!(body["reply"].is_null());

    let last = waiting.await.unwrap().unwrap();
    assert_eq!(last["reply"], "Qh5#");
    assert_eq!(last["game_over"], true);

    // Player 1 learned the game ended from the reply; the next move is refused.
    let (status, _) = post(&relay, "/move", move_body(game_id, 1, "Nf6", false))
        .await
        .unwrap();
    assert_eq!(status, 410);
}

/// A final move answers immediately even if nobody is on the other side.
#[tokio::test]
async fn test_final_move_does_not_wait() {
    let relay = spawn_relay(None).await.unwrap();
    let game_id = create_and_join(&relay, "Alice", "Bob").await.unwrap();

    let (status, body) = tokio::time::timeout(
        Duration::from_secs(5),
        post(&relay, "/move", move_body(game_id, 1, "resign", true)),
    )
    .await
    .expect("final move should not block")
    .unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["game_over"], true);

    // The game is over; further relays are refused.
    let (status, _) = post(&relay, "/move", move_body(game_id, 0, "a1", false))
        .await
        .unwrap();
    assert_eq!(status, 410);
}

/// Many games at once stay independent.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_games() {
    let relay = spawn_relay(Some(Duration::from_secs(10))).await.unwrap();

    let mut games = tokio::task::JoinSet::new();
    for n in 0..16 {
        let game_id = create_and_join(&relay, &format!("host-{n}"), &format!("guest-{n}"))
            .await
            .unwrap();
        let url = relay.url("/move");
        games.spawn(async move {
            let client = reqwest::Client::new();
            let a = client
                .post(&url)
                .json(&move_body(game_id, 0, &format!("a{n}"), false))
                .send();
            let b = client
                .post(&url)
                .json(&move_body(game_id, 1, &format!("b{n}"), false))
                .send();
            let (a, b) = tokio::join!(a, b);
            let a: Value = a?.json().await?;
            let b: Value = b?.json().await?;
            Ok::<_, reqwest::Error>((n, a, b))
        });
    }

    while let Some(done) = games.join_next().await {
        let (n, a, b) = done.unwrap().unwrap();
        assert_eq!(a["reply"], format!("b{n}"));
        assert_eq!(b["reply"], format!("a{n}"));
    }
}
