//! Wordle Battle Spectator State Library
//!
//! This crate provides state management for the LLM Wordle Battle
//! spectator display: two AI players compete to guess a secret word, and
//! this engine mirrors the match locally from the engine's event stream.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Grid Model** - Two per-player letter grids with per-cell feedback
//!   classifications.
//!
//! - **Log Pipeline** - Append-only battle log with collapsible
//!   raw-response attachments for diagnostics.
//!
//! - **Turn Renderer** - Turns `player_turn` events into grid mutations
//!   and a staggered, epoch-guarded feedback reveal schedule.
//!
//! - **Lifecycle Controller** - Match phase machine (idle → starting →
//!   running → finished), winner announcement, celebration.
//!
//! # Design Principles
//!
//! 1. **One owner per concern** - `Battle` owns the match mirror; the grid,
//!    log, and scheduler are only mutated through their contracts.
//!
//! 2. **No networking** - This crate is pure state. Inbound events are fed
//!    in by the transport; outbound requests come back as values.
//!
//! 3. **Cooperative time** - Reveals are scheduled against explicit
//!    `Instant`s and run by `tick`, so nothing blocks and tests never sleep.
//!
//! 4. **Serialization-ready** - Display-facing types convert to JSON for
//!    clients.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use wordle_battle_state::state::{Battle, Classification, Player, ServerEvent, REVEAL_STEP};
//!
//! let mut battle = Battle::new();
//! let now = Instant::now();
//!
//! // The user presses start; deliver the returned request to the engine.
//! battle.start().unwrap();
//!
//! // Feed engine events as they arrive.
//! battle.handle(
//!     ServerEvent::GameStarted {
//!         status: "Game started!".to_string(),
//!         max_turns: 6,
//!     },
//!     now,
//! );
//!
//! let event: ServerEvent = serde_json::from_value(serde_json::json!({
//!     "event": "player_turn",
//!     "data": {
//!         "player": "Player 1",
//!         "guess": "crane",
//!         "feedback": "🟩⬜⬜🟨⬜",
//!         "turn": 1
//!     }
//! }))
//! .unwrap();
//! battle.handle(event, now);
//!
//! // Letters land immediately; classifications follow the reveal schedule.
//! let diagnostics = battle.tick(now + REVEAL_STEP * 5);
//! assert_eq!(diagnostics.len(), 5);
//! assert_eq!(
//!     battle.grid(Player::One).row(0).cells()[0].classification,
//!     Classification::Correct
//! );
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
