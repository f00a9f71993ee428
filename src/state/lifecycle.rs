//! Match lifecycle state.
//!
//! Phase machine for one match, the authoritative `MatchState` mirror, and
//! the end-of-match presentation derived from the winner.
//!
//! ```text
//! Idle ──start──▶ Starting ──game_started──▶ Running ──game_finished──▶ Finished
//!   ▲                │                                                     │
//!   │                │ error                                               │
//!   └────────────────┴──────────────── reset (from any state) ─────────────┘
//! ```

use std::fmt;

use super::grid::DEFAULT_MAX_TURNS;

/// Shown in place of the secret word while the match is in progress.
pub const HIDDEN_WORD: &str = "[Hidden]";

/// Emojis spawned by the celebration effect.
pub const CELEBRATION_EMOJIS: [&str; 8] = ["🎉", "🎊", "🏆", "⭐", "🌟", "🎯", "🔥", "💫"];

/// Match phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No match; start is available
    #[default]
    Idle,
    /// Start requested, waiting for the engine to confirm
    Starting,
    /// Match in progress
    Running,
    /// Match over, result on display
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }

    /// Whether the start affordance is enabled.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a match has begun (start was confirmed at some point).
    pub fn has_started(&self) -> bool {
        matches!(self, Self::Running | Self::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a start request is not valid in the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartError {
    pub phase: Phase,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot start a match while {}", self.phase)
    }
}

impl std::error::Error for StartError {}

/// Match winner, as the engine reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
    /// Both players guessed the word on the same turn
    Tie,
    /// Neither player guessed the word
    NoWinner,
}

impl Winner {
    /// Parse the engine's winner string. Anything unrecognized counts as no
    /// winner, matching the engine's `"No winner"` default.
    pub fn from_wire(winner: &str) -> Self {
        match winner {
            "Player 1" => Self::PlayerOne,
            "Player 2" => Self::PlayerTwo,
            "Tie" => Self::Tie,
            _ => Self::NoWinner,
        }
    }

    /// Whether this result triggers the celebration effect.
    pub fn celebrates(&self) -> bool {
        !matches!(self, Self::NoWinner)
    }
}

/// Authoritative local mirror of the match, built incrementally from engine
/// events. One instance per match; reset returns it to these defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub phase: Phase,
    /// Last completed turn, 0 before the first.
    pub current_turn: u32,
    pub max_turns: u32,
    /// Hidden until the match finishes.
    pub secret_word: Option<String>,
    /// Set only once the match finishes.
    pub winner: Option<Winner>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            current_turn: 0,
            max_turns: DEFAULT_MAX_TURNS as u32,
            secret_word: None,
            winner: None,
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Secret word for display: the real word once revealed, a placeholder
    /// before that.
    pub fn secret_word_display(&self) -> &str {
        self.secret_word.as_deref().unwrap_or(HIDDEN_WORD)
    }

    /// Turn counter for display, `current/max`.
    pub fn turn_counter(&self) -> String {
        format!("{}/{}", self.current_turn, self.max_turns)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "phase": self.phase.as_str(),
            "current_turn": self.current_turn,
            "max_turns": self.max_turns,
            "secret_word": self.secret_word_display(),
            "winner": self.winner.map(|w| w.presentation_case())
        })
    }
}

/// Visual tone of a player's status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Thinking,
    Winner,
    Loser,
}

impl StatusTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Thinking => "thinking",
            Self::Winner => "winner",
            Self::Loser => "loser",
        }
    }
}

/// One player's status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPanel {
    pub status: String,
    pub tone: StatusTone,
}

impl Default for PlayerPanel {
    fn default() -> Self {
        Self {
            status: "Waiting...".to_string(),
            tone: StatusTone::Neutral,
        }
    }
}

impl PlayerPanel {
    pub fn set(&mut self, status: impl Into<String>, tone: StatusTone) {
        self.status = status.into();
        self.tone = tone;
    }
}

/// End-of-match announcement, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub headline: String,
    pub details: String,
}

/// Everything the display needs when a match finishes: status line,
/// announcement, both panels, and whether to celebrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishPresentation {
    pub status: String,
    pub announcement: Announcement,
    pub player_one: PlayerPanel,
    pub player_two: PlayerPanel,
    pub celebrate: bool,
}

impl Winner {
    fn presentation_case(&self) -> &'static str {
        match self {
            Self::PlayerOne => "Player 1",
            Self::PlayerTwo => "Player 2",
            Self::Tie => "Tie",
            Self::NoWinner => "No winner",
        }
    }

    /// Derive the end-of-match presentation for this result.
    pub fn presentation(&self, secret_word: &str, total_turns: u32) -> FinishPresentation {
        let panel = |status: &str, tone| PlayerPanel {
            status: status.to_string(),
            tone,
        };
        match self {
            Self::PlayerOne => FinishPresentation {
                status: "🎉 Player 1 Wins!".to_string(),
                announcement: Announcement {
                    headline: "🔵 Player 1 Wins!".to_string(),
                    details: format!(
                        "Player 1 (llama.cpp) successfully guessed \"{}\" in {} turns!",
                        secret_word, total_turns
                    ),
                },
                player_one: panel("WINNER! 🎉", StatusTone::Winner),
                player_two: panel("Good try!", StatusTone::Loser),
                celebrate: true,
            },
            Self::PlayerTwo => FinishPresentation {
                status: "🎉 Player 2 Wins!".to_string(),
                announcement: Announcement {
                    headline: "🔴 Player 2 Wins!".to_string(),
                    details: format!(
                        "Player 2 (Ollama) successfully guessed \"{}\" in {} turns!",
                        secret_word, total_turns
                    ),
                },
                player_one: panel("Good try!", StatusTone::Loser),
                player_two: panel("WINNER! 🎉", StatusTone::Winner),
                celebrate: true,
            },
            Self::Tie => FinishPresentation {
                status: "🤝 It's a Tie!".to_string(),
                announcement: Announcement {
                    headline: "🤝 It's a Tie!".to_string(),
                    details: format!(
                        "Both players guessed \"{}\" on turn {}!",
                        secret_word, total_turns
                    ),
                },
                player_one: panel("TIE! 🤝", StatusTone::Winner),
                player_two: panel("TIE! 🤝", StatusTone::Winner),
                celebrate: true,
            },
            Self::NoWinner => FinishPresentation {
                status: "😔 No Winner".to_string(),
                announcement: Announcement {
                    headline: "😔 No Winner".to_string(),
                    details: format!(
                        "Neither player could guess \"{}\" in {} turns.",
                        secret_word, total_turns
                    ),
                },
                player_one: panel("No luck this time", StatusTone::Loser),
                player_two: panel("No luck this time", StatusTone::Loser),
                celebrate: false,
            },
        }
    }
}
