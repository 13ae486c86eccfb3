//! bigtac-ctl — command-line client for the Big Tac relay.

use anyhow::{Context, Result};

mod cmd;

const DEFAULT_PORT: u16 = 8080;

fn print_usage() {
    println!("Usage: bigtac-ctl [--port <port>] [--timeout-ms <ms>] <command>");
    println!();
    println!("Commands:");
    println!("  status                            Show relay status and sessions");
    println!("  inspect <game_id>                 Show one session");
    println!("  create <name>                     Create a game as player 0");
    println!("  join <game_id> <name>             Join a game as player 1");
    println!("  wait <game_id>                    Block until player 1 joins");
    println!("  move <game_id> <slot> <move>      Send a move, print the reply");
    println!("  move <game_id> <slot> <move> --final");
    println!("                                    Send the last move of the game");
    println!();
    println!("Options:");
    println!("  --port <port>       Relay API port (default: {})", DEFAULT_PORT);
    println!("  --timeout-ms <ms>   Bound for wait/move (default: relay setting)");
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut port = DEFAULT_PORT;
    let mut timeout_ms = None;
    let mut final_move = false;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                i += 1;
                port = args
                    .get(i)
                    .context("--port requires a value")?
                    .parse()
                    .context("--port must be a number")?;
            }
            "--timeout-ms" => {
                i += 1;
                timeout_ms = Some(
                    args.get(i)
                        .context("--timeout-ms requires a value")?
                        .parse()
                        .context("--timeout-ms must be a number")?,
                );
            }
            "--final" => final_move = true,
            other => remaining.push(other),
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["status"] | [] => cmd::sessions::cmd_status(port).await,
        ["inspect", id] => cmd::sessions::cmd_session_inspect(port, id).await,
        ["create", name] => cmd::play::cmd_create(port, name).await,
        ["join", id, name] => cmd::play::cmd_join(port, id, name).await,
        ["wait", id] => cmd::play::cmd_wait(port, id, timeout_ms).await,
        ["move", id, slot, mv] => {
            cmd::play::cmd_move(port, id, slot, mv, final_move, timeout_ms).await
        }
        ["help"] | ["--help"] | ["-h"] => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
