use crate::Seat;

/// Which way play moves around the table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Turn order and countdown of one table.
///
/// `next` runs ahead of `current` while a turn is being resolved: effects
/// like a block card push it one extra step, and the Room moves `current`
/// onto it once the round is over.
#[derive(Debug, Default, Clone)]
pub struct Turns {
    seats: usize,
    current: Seat,
    next: Seat,
    direction: Direction,
    countdown: Option<u32>,
}

impl Turns {
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }
    pub fn seats(&self) -> usize {
        self.seats
    }
    pub fn current(&self) -> Seat {
        self.current
    }
    pub fn next(&self) -> Seat {
        self.next
    }
    pub fn direction(&self) -> Direction {
        self.direction
    }
    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }
}

/// Turn order.
impl Turns {
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }
    /// Steps `next` once in the current direction.
    pub fn cycle(&mut self) {
        if self.seats == 0 {
            return;
        }
        self.next = match self.direction {
            Direction::Forward => (self.next + 1) % self.seats,
            Direction::Backward => (self.next + self.seats - 1) % self.seats,
        };
    }
    /// Hands the turn to `next`.
    pub fn advance(&mut self) {
        self.current = self.next;
    }
    pub fn sit(&mut self) {
        self.seats += 1;
    }
    /// Forgets a seat. Indices above it shift down so everyone keeps their
    /// relative order; an index left past the end wraps to the first seat.
    pub fn stand(&mut self, seat: Seat) {
        if seat >= self.seats {
            return;
        }
        self.seats -= 1;
        let seats = self.seats;
        let shift = |i: Seat| {
            let i = if i > seat { i - 1 } else { i };
            if i >= seats { 0 } else { i }
        };
        self.current = shift(self.current);
        self.next = shift(self.next);
    }
}

/// Countdown.
impl Turns {
    pub fn arm(&mut self, ticks: u32) {
        self.countdown = Some(ticks);
    }
    /// Adds time to a running countdown.
    pub fn extend(&mut self, ticks: u32) {
        if let Some(ref mut left) = self.countdown {
            *left += ticks;
        }
    }
    pub fn disarm(&mut self) {
        self.countdown = None;
    }
    /// Counts one unit down. True exactly once, on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        match self.countdown {
            Some(left) if left <= 1 => {
                self.countdown = None;
                true
            }
            Some(left) => {
                self.countdown = Some(left - 1);
                false
            }
            None => false,
        }
    }
}
