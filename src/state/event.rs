//! Wire types for the match-engine channel.
//!
//! Inbound events arrive as `{event, data}` envelopes and deserialize into
//! one tagged enum, so routing is an exhaustive match and a new event kind
//! is a compile-checked extension. Outbound requests serialize the same way.

use serde::{Deserialize, Serialize};

/// Parsing method assumed when the engine omits one.
pub const DEFAULT_PARSING_METHOD: &str = "Unknown";

/// Payload of a `player_turn` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TurnPayload {
    pub player: String,
    pub guess: String,
    pub feedback: String,
    /// 1-based turn number.
    pub turn: u32,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub raw_response: String,
    #[serde(default)]
    pub parsing_method: Option<String>,
}

impl TurnPayload {
    /// Parsing method with the wire default applied.
    pub fn parsing_method(&self) -> &str {
        self.parsing_method.as_deref().unwrap_or(DEFAULT_PARSING_METHOD)
    }
}

/// Events the match engine sends us.
///
/// Unknown payload fields are ignored so the engine can grow its messages
/// without breaking older displays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected {
        status: String,
    },
    GameStarted {
        status: String,
        max_turns: u32,
    },
    StatusUpdate {
        status: String,
        turn: u32,
        max_turns: u32,
    },
    PlayerTurn(TurnPayload),
    GameFinished {
        winner: String,
        secret_word: String,
        total_turns: u32,
    },
    Error {
        message: String,
    },
}

/// Requests we send to the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Ask the engine to begin a new match.
    StartGame,
    /// Fire-and-forget diagnostic echo; no response expected.
    LogEvent { message: String },
}
