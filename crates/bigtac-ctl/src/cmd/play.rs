//! Game-flow commands. `wait` and `move` block until the opponent acts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::http::{base_url, post_json_body};

#[derive(Serialize)]
struct CreateRequest<'a> {
    player: &'a str,
}

#[derive(Deserialize)]
struct CreateResponse {
    game_id: u64,
}

#[derive(Serialize)]
struct JoinRequest<'a> {
    game_id: u64,
    player: &'a str,
}

#[derive(Deserialize)]
struct OpponentResponse {
    game_id: u64,
    opponent: String,
}

#[derive(Serialize)]
struct WaitRequest {
    game_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
}

#[derive(Serialize)]
struct MoveRequest<'a> {
    game_id: u64,
    player: u8,
    #[serde(rename = "move")]
    move_data: &'a str,
    game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
}

#[derive(Deserialize)]
struct MoveResponse {
    reply: Option<String>,
    game_over: bool,
}

fn parse_game_id(s: &str) -> Result<u64> {
    s.parse().with_context(|| format!("invalid game id: {}", s))
}

pub async fn cmd_create(port: u16, player: &str) -> Result<()> {
    let resp: CreateResponse =
        post_json_body(&format!("{}/create", base_url(port)), &CreateRequest { player }).await?;
    println!("✓ Created game {}", resp.game_id);
    println!("  Waiting players run: bigtac-ctl wait {}", resp.game_id);
    Ok(())
}

pub async fn cmd_join(port: u16, game_id: &str, player: &str) -> Result<()> {
    let game_id = parse_game_id(game_id)?;
    let resp: OpponentResponse = post_json_body(
        &format!("{}/join", base_url(port)),
        &JoinRequest { game_id, player },
    )
    .await?;
    println!("✓ Joined game {} against {}", resp.game_id, resp.opponent);
    Ok(())
}

pub async fn cmd_wait(port: u16, game_id: &str, timeout_ms: Option<u64>) -> Result<()> {
    let game_id = parse_game_id(game_id)?;
    println!("Waiting for a second player in game {}...", game_id);
    let resp: OpponentResponse = post_json_body(
        &format!("{}/wait", base_url(port)),
        &WaitRequest {
            game_id,
            timeout_ms,
        },
    )
    .await?;
    println!("✓ {} joined game {}", resp.opponent, resp.game_id);
    Ok(())
}

pub async fn cmd_move(
    port: u16,
    game_id: &str,
    slot: &str,
    move_data: &str,
    game_over: bool,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let game_id = parse_game_id(game_id)?;
    let player: u8 = slot
        .parse()
        .with_context(|| format!("invalid player slot: {}", slot))?;

    let resp: MoveResponse = post_json_body(
        &format!("{}/move", base_url(port)),
        &MoveRequest {
            game_id,
            player,
            move_data,
            game_over,
            timeout_ms,
        },
    )
    .await?;

    match resp.reply {
        Some(reply) if resp.game_over => println!("Opponent played: {} (game over)", reply),
        Some(reply) => println!("Opponent played: {}", reply),
        None if resp.game_over => println!("Game over!"),
        None => println!("No reply."),
    }
    Ok(())
}
