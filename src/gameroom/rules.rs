use super::table::*;
use crate::ROUND_DELAY;
use crate::Seat;

/// What a resolved action means for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Same actor, same countdown: the engine is waiting on more input.
    Waiting,
    /// Another decision inside the same round. The countdown is re-armed.
    Next,
    /// The round is resolved. The scheduler runs the win check and moves on.
    RoundOver,
}

/// Why an action was refused. Refusals never change game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Illegal {
    NotYourTurn,
    NoSuchCard(usize),
    Incompatible { card: String, top: String },
    AwaitingChoice,
    NothingToChoose,
    NoSuchOption(usize),
}

impl std::fmt::Display for Illegal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotYourTurn => write!(f, "It's not your turn"),
            Self::NoSuchCard(n) => write!(f, "You don't have a card #{}", n),
            Self::Incompatible { card, top } => write!(f, "You can't place {} on {}", card, top),
            Self::AwaitingChoice => write!(f, "Finish your pick first"),
            Self::NothingToChoose => write!(f, "There is nothing to pick right now"),
            Self::NoSuchOption(n) => write!(f, "There is no option #{}", n + 1),
        }
    }
}

impl std::error::Error for Illegal {}

/// Rule set plugged into a Room.
///
/// The Room owns turn order, countdown and delivery; a rule set owns its
/// cards and scoring. Every method runs synchronously on the room's task
/// and talks to players only through the table's outbox.
pub trait Rules: Send {
    /// Parsed form of a player's text command.
    type Action: Send + std::fmt::Debug;

    fn name(&self) -> &'static str;
    /// Whether a match can start or continue with this many seats.
    fn playable(&self, seats: usize) -> bool;
    /// Units between a resolved round and the next one.
    fn intermission(&self) -> u32 {
        ROUND_DELAY
    }
    /// Text that is not a command for this game is `None` and gets ignored.
    fn parse(&self, text: &str) -> Option<Self::Action>;
    /// Seat whose decision is pending, if any.
    fn actor(&self, table: &Table) -> Option<Seat>;

    /// Once, when the match starts.
    fn start(&mut self, _: &mut Table) {}
    /// At the start of every round.
    fn begin_round(&mut self, table: &mut Table);
    fn act(&mut self, table: &mut Table, seat: Seat, action: Self::Action) -> Result<Outcome, Illegal>;
    /// Answer to a prompt. Most rule sets never prompt.
    fn choose(&mut self, _: &mut Table, _: Seat, _: usize) -> Result<Outcome, Illegal> {
        Err(Illegal::NothingToChoose)
    }
    /// Default action for the pending actor when the countdown runs out.
    fn force(&mut self, table: &mut Table) -> Outcome;
    /// Drops all state of a seat that left. Seats above it shift down by one.
    fn stand(&mut self, seat: Seat);
    /// Checked once per resolved round.
    fn winner(&self, table: &Table) -> Option<Seat>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_reads_like_a_reply() {
        assert_eq!(Illegal::NotYourTurn.to_string(), "It's not your turn");
        assert_eq!(Illegal::NoSuchOption(0).to_string(), "There is no option #1");
        let incompatible = Illegal::Incompatible {
            card: "7 🟩".into(),
            top: "5 🟥".into(),
        };
        assert_eq!(incompatible.to_string(), "You can't place 7 🟩 on 5 🟥");
    }
}
