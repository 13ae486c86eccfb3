//! Session inspection commands.

use anyhow::Result;
use serde::Deserialize;

use super::http::{base_url, get_json};

#[derive(Deserialize)]
struct StatusResponse {
    session_count: usize,
    shutting_down: bool,
    sessions: Vec<SessionInfo>,
}

#[derive(Deserialize)]
struct SessionInfo {
    game_id: u64,
    first: String,
    second: Option<String>,
    state: String,
    moves: u64,
    waiters: usize,
    age_secs: u64,
    idle_secs: u64,
}

pub async fn cmd_status(port: u16) -> Result<()> {
    let resp: StatusResponse = get_json(&format!("{}/status", base_url(port))).await?;

    println!("═══════════════════════════════════════");
    println!("  Big Tac Relay Status");
    println!("═══════════════════════════════════════");
    println!("  Sessions      : {}", resp.session_count);
    if resp.shutting_down {
        println!("  (shutting down)");
    }

    if resp.sessions.is_empty() {
        println!("\n  No sessions.");
    } else {
        println!("\n  Sessions:");
        for s in &resp.sessions {
            println!("  ┌─ game {}", s.game_id);
            println!("  │  players : {} vs {}", s.first, s.second.as_deref().unwrap_or("(waiting)"));
            println!("  │  state   : {}", s.state);
            println!("  │  moves   : {}", s.moves);
            println!("  └─ idle    : {}s", s.idle_secs);
        }
    }

    Ok(())
}

pub async fn cmd_session_inspect(port: u16, game_id: &str) -> Result<()> {
    let s: SessionInfo = get_json(&format!("{}/sessions/{}", base_url(port), game_id)).await?;

    println!("═══════════════════════════════════════");
    println!("  Session Details");
    println!("═══════════════════════════════════════");
    println!("  Game     : {}", s.game_id);
    println!("  First    : {}", s.first);
    println!("  Second   : {}", s.second.as_deref().unwrap_or("(waiting)"));
    println!("  State    : {}", s.state);
    println!("  Moves    : {}", s.moves);
    println!("  Waiting  : {}", s.waiters);
    println!("  Age      : {}s", s.age_secs);
    println!("  Idle     : {}s", s.idle_secs);

    Ok(())
}
