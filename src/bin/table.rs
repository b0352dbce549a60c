//! Hot-seat console table.
//!
//! Seats the named players at one game and reads their input from stdin,
//! one line per event:
//!
//! - `<name> <text>` a command such as `ana hit` or `bo 3`
//! - `<name> #<n>` answers the last prompt with option n
//! - `<name> leave` gets up from the table

use clap::Parser;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tabletop::PlayerId;
use tabletop::RoomId;
use tabletop::blackjack::Blackjack;
use tabletop::gameroom::Inbound;
use tabletop::gameroom::Player;
use tabletop::gameroom::TimerConfig;
use tabletop::hosting::Casino;
use tabletop::players::Console;
use tabletop::uno::Uno;
use tokio::io::AsyncBufReadExt;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Game {
    Uno,
    Blackjack,
}

#[derive(Parser, Debug)]
#[command(name = "table", about = "Play Uno or Blackjack in one terminal")]
struct Args {
    /// Rule set to play
    #[arg(long, value_enum, default_value_t = Game::Uno)]
    game: Game,
    /// Comma separated player names, in seating order
    #[arg(long, value_delimiter = ',', required = true)]
    players: Vec<String>,
    /// Milliseconds per countdown unit
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,
    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,
    /// Print messages as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tabletop::log();
    let args = Args::parse();
    let players = args
        .players
        .iter()
        .enumerate()
        .map(|(i, name)| Arc::new(Console::new(i as PlayerId + 1, name.trim(), args.json)) as Arc<dyn Player>)
        .collect::<Vec<_>>();
    let names = players
        .iter()
        .map(|p| (p.name().to_lowercase(), p.id()))
        .collect::<HashMap<_, _>>();
    let timer = TimerConfig {
        tick: Duration::from_millis(args.tick_ms),
        ..TimerConfig::default()
    };
    let casino = Arc::new(Casino::default());
    let (id, task) = match args.game {
        Game::Uno => {
            let rules = args.seed.map(Uno::seeded).unwrap_or_default();
            casino.open(rules, players, timer).await?
        }
        Game::Blackjack => {
            let rules = args.seed.map(Blackjack::seeded).unwrap_or_default();
            casino.open(rules, players, timer).await?
        }
    };
    let reader = tokio::spawn(read(casino.clone(), names, id));
    let winner = task.await?;
    reader.abort();
    match winner {
        Some(player) => log::info!("[table] P{} won", player),
        None => log::info!("[table] no winner"),
    }
    Ok(())
}

/// Feeds stdin into the casino until the input ends, then stops the room.
async fn read(casino: Arc<Casino>, names: HashMap<String, PlayerId>, id: RoomId) -> anyhow::Result<()> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line, &names) {
            Some(event) => {
                if let Err(e) = casino.route(event).await {
                    log::warn!("[table] {}", e);
                }
            }
            None if line.trim().is_empty() => {}
            None => log::warn!("[table] cannot read {:?}", line),
        }
    }
    casino.stop(id).await
}

fn parse(line: &str, names: &HashMap<String, PlayerId>) -> Option<Inbound> {
    let (name, rest) = line.trim().split_once(char::is_whitespace)?;
    let player = *names.get(&name.to_lowercase())?;
    let rest = rest.trim();
    if rest.eq_ignore_ascii_case("leave") {
        return Some(Inbound::Leave(player));
    }
    match rest.strip_prefix('#') {
        Some(n) => n
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(|option| Inbound::Choice { player, option }),
        None => Some(Inbound::text(player, rest)),
    }
}
