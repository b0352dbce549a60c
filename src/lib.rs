//! Turn-based multiplayer card game engine.
//!
//! A [`gameroom::Room`] drives one match: it owns the seated players, the turn
//! order and the countdown, and delegates every rule decision to a
//! [`gameroom::Rules`] implementation. Two rule sets ship with the crate.
//!
//! ## Modules
//!
//! - [`cards`]: playing cards and the generic two-pile [`cards::Deck`]
//! - [`gameroom`]: players, broadcast, scheduler, timer
//! - [`uno`]: behavior-composed Uno cards and the Uno rule engine
//! - [`blackjack`]: scoring, dealer logic and the Blackjack rule engine
//! - [`hosting`]: registry of concurrently running rooms
//! - [`players`]: in-process player implementations
pub mod blackjack;
pub mod cards;
pub mod gameroom;
pub mod hosting;
pub mod players;
pub mod uno;

/// Identity token of a user seated at a table.
pub type PlayerId = u64;
/// Index of a seat at a table, in seating order.
pub type Seat = usize;
/// Key of a running room inside a casino.
pub type RoomId = u64;

// ============================================================================
// TIMING
// All durations are counted in ticks of TimerConfig::tick.
// ============================================================================
/// Ticks a player has to decide before the forced action runs.
pub const DECISION_TIMEOUT: u32 = 20;
/// Ticks between a round summary and the next round.
pub const ROUND_DELAY: u32 = 10;
/// Ticks granted back to a player for every attribute they supply.
pub const ATTRIBUTE_BONUS: u32 = 5;
/// Flushes a message gets at one recipient before it is dropped.
pub const DELIVERY_ATTEMPTS: u32 = 3;

// ============================================================================
// BLACKJACK
// ============================================================================
/// Highest score that does not bust.
pub const BLACKJACK: u32 = 21;
/// Dealer keeps drawing while strictly below this score.
pub const DEALER_STANDS: u32 = 15;
/// Round wins needed to take the match.
pub const WIN_POINTS: u32 = 3;
/// Most gamblers at one table. Eight hands can never hold all 52 cards.
pub const BLACKJACK_SEATS: usize = 7;

// ============================================================================
// UNO
// ============================================================================
/// Cards dealt to every player when an Uno match starts.
pub const UNO_HAND: usize = 7;
/// Seated players needed to keep an Uno match going.
pub const UNO_MIN_PLAYERS: usize = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Join display strings the way people list things: "a", "a and b", "a, b and c".
pub fn human_join<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., last] => format!(
            "{} and {}",
            init.iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            last.as_ref()
        ),
    }
}
