//! Turn rendering.
//!
//! Transforms one `player_turn` event into grid mutations, a staggered
//! feedback-reveal schedule, and log entries. Letters land synchronously;
//! classifications land later through the scheduler, one cell every
//! [`REVEAL_STEP`] ("type, then reveal").

use std::fmt;
use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use super::event::TurnPayload;
use super::grid::{Classification, Grid, Player, WORD_LENGTH};
use super::lifecycle::MatchState;
use super::log::{BattleLog, LogKind};

/// Delay between consecutive letter reveals.
pub const REVEAL_STEP: Duration = Duration::from_millis(200);

/// Feedback symbol for a fully correct position.
pub const SYMBOL_CORRECT: &str = "🟩";
/// Feedback symbol for a letter in the wrong position.
pub const SYMBOL_PRESENT: &str = "🟨";
/// Feedback symbol for a letter not in the word.
pub const SYMBOL_ABSENT: &str = "⬜";

/// One decoded feedback symbol.
///
/// Decoded once at the boundary; everything downstream matches on the enum
/// instead of re-comparing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackSymbol {
    Correct,
    Present,
    Absent,
    /// Anything else the engine sent; kept verbatim for diagnostics.
    Unknown(String),
}

impl FeedbackSymbol {
    pub fn from_grapheme(grapheme: &str) -> Self {
        match grapheme {
            SYMBOL_CORRECT => Self::Correct,
            SYMBOL_PRESENT => Self::Present,
            SYMBOL_ABSENT => Self::Absent,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Cell classification this symbol maps to; `None` for unknown symbols,
    /// which leave the cell untouched.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::Correct => Some(Classification::Correct),
            Self::Present => Some(Classification::Present),
            Self::Absent => Some(Classification::Absent),
            Self::Unknown(_) => None,
        }
    }

    /// The symbol as it appeared on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Correct => SYMBOL_CORRECT,
            Self::Present => SYMBOL_PRESENT,
            Self::Absent => SYMBOL_ABSENT,
            Self::Unknown(s) => s,
        }
    }
}

/// Decode a feedback string symbol by symbol.
///
/// The symbols are multi-byte emoji, so this must iterate graphemes; a
/// 5-symbol feedback always yields exactly 5 entries.
pub fn decode_feedback(feedback: &str) -> Vec<FeedbackSymbol> {
    feedback
        .graphemes(true)
        .map(FeedbackSymbol::from_grapheme)
        .collect()
}

/// Protocol errors from a `player_turn` event. Non-fatal: the event is
/// dropped, an Error log entry is appended, state is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    UnknownPlayer(String),
    MalformedGuess { length: usize },
    MalformedFeedback { symbols: usize },
    TurnOutOfRange { turn: u32, max_turns: u32 },
    TurnOutOfOrder { expected: u32, got: u32 },
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlayer(name) => write!(f, "Unknown player \"{}\"", name),
            Self::MalformedGuess { length } => {
                write!(f, "Malformed guess: expected {} letters, got {}", WORD_LENGTH, length)
            }
            Self::MalformedFeedback { symbols } => {
                write!(
                    f,
                    "Malformed feedback: expected {} symbols, got {}",
                    WORD_LENGTH, symbols
                )
            }
            Self::TurnOutOfRange { turn, max_turns } => {
                write!(f, "Turn {} out of range (max turns {})", turn, max_turns)
            }
            Self::TurnOutOfOrder { expected, got } => {
                write!(f, "Turn {} out of order: expected turn {}", got, expected)
            }
        }
    }
}

impl std::error::Error for TurnError {}

/// A feedback reveal waiting for its due time.
#[derive(Debug, Clone)]
pub struct ScheduledReveal {
    /// Match epoch this reveal belongs to; stale epochs no-op.
    pub epoch: u64,
    pub player: Player,
    pub row: usize,
    pub col: usize,
    /// 1-based turn number, for the diagnostic echo.
    pub turn: u32,
    pub symbol: FeedbackSymbol,
    pub due: Instant,
}

/// Timer queue for staggered reveals.
///
/// Insertion order is preserved when draining, which keeps reveals for one
/// row strictly ordered by position (their delays increase with position).
/// Reveals are independent: reveals from different turns interleave freely.
#[derive(Debug, Default)]
pub struct RevealScheduler {
    tasks: Vec<ScheduledReveal>,
}

impl RevealScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, reveal: ScheduledReveal) {
        self.tasks.push(reveal);
    }

    /// Remove and return every reveal due at `now`, in insertion order.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledReveal> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.due <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;
        due
    }

    /// Earliest pending due time, for the caller's timer.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

/// Outcome of a successfully rendered turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: Player,
    /// Uppercased guess as written to the grid.
    pub guess: String,
    /// All five symbols were 🟩. Set immediately, before the staggered
    /// reveal finishes; status and cell coloring are independent signals.
    pub winning: bool,
}

/// Renders one turn event. Borrows the pieces it mutates for the duration
/// of a single event only.
pub struct TurnRenderer<'a> {
    pub grid: &'a mut Grid,
    pub log: &'a mut BattleLog,
    pub scheduler: &'a mut RevealScheduler,
    pub state: &'a mut MatchState,
}

impl TurnRenderer<'_> {
    /// Apply a `player_turn` event.
    ///
    /// Validation happens before any mutation, so a rejected event leaves
    /// the grid, the log, and the scheduler exactly as they were.
    pub fn render(
        &mut self,
        payload: &TurnPayload,
        now: Instant,
        epoch: u64,
    ) -> Result<TurnOutcome, TurnError> {
        let player = Player::from_name(&payload.player)
            .ok_or_else(|| TurnError::UnknownPlayer(payload.player.clone()))?;

        let guess = payload.guess.to_uppercase();
        let letters: Vec<char> = guess.chars().collect();
        let letters: [char; WORD_LENGTH] = letters
            .try_into()
            .map_err(|v: Vec<char>| TurnError::MalformedGuess { length: v.len() })?;

        let symbols = decode_feedback(&payload.feedback);
        if symbols.len() != WORD_LENGTH {
            return Err(TurnError::MalformedFeedback {
                symbols: symbols.len(),
            });
        }

        let max_turns = self.grid.max_turns() as u32;
        if payload.turn == 0 || payload.turn > max_turns {
            return Err(TurnError::TurnOutOfRange {
                turn: payload.turn,
                max_turns,
            });
        }
        let row = (payload.turn - 1) as usize;
        let expected = self.grid.next_unfilled_row().unwrap_or(self.grid.max_turns());
        if row != expected {
            return Err(TurnError::TurnOutOfOrder {
                expected: expected as u32 + 1,
                got: payload.turn,
            });
        }

        // Letters land now; classifications follow the reveal schedule.
        self.grid.set_row(row, letters);
        for (col, symbol) in symbols.iter().enumerate() {
            self.scheduler.schedule(ScheduledReveal {
                epoch,
                player,
                row,
                col,
                turn: payload.turn,
                symbol: symbol.clone(),
                due: now + REVEAL_STEP * (col as u32 + 1),
            });
        }

        self.state.current_turn = payload.turn;

        let kind = match player {
            Player::One => LogKind::PlayerOne,
            Player::Two => LogKind::PlayerTwo,
        };
        let message = self.log.config().compose_turn_message(
            payload.turn,
            &guess,
            &payload.feedback,
            &payload.comments,
            &payload.raw_response,
            payload.parsing_method.as_deref(),
        );
        self.log.append(kind, player.as_str(), &message);
        if !payload.raw_response.trim().is_empty() {
            self.log
                .append_raw(kind, player.as_str(), &payload.raw_response, payload.parsing_method());
        }

        let winning = symbols.iter().all(|s| *s == FeedbackSymbol::Correct);
        Ok(TurnOutcome {
            player,
            guess,
            winning,
        })
    }
}
