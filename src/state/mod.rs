//! State management for the Wordle Battle spectator display.
//!
//! This module provides the core state types and components:
//!
//! - `grid` - Per-player letter grids with feedback classifications
//! - `log` - Append-only battle log with collapsible raw responses
//! - `turn` - Turn rendering and the staggered feedback-reveal scheduler
//! - `lifecycle` - Match phase machine and end-of-match presentation
//! - `event` - Wire types for the match-engine channel
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Battle                             │
//! │                                                              │
//! │  ServerEvent ──▶ handle() ─┬─▶ TurnRenderer ──▶ Grid (×2)    │
//! │                            │        │                        │
//! │                            │        ├─▶ BattleLog            │
//! │                            │        └─▶ RevealScheduler      │
//! │                            └─▶ MatchState / panels /         │
//! │                                announcement                  │
//! │                                                              │
//! │  tick(now) ──▶ due reveals ──▶ classifications + log_event   │
//! │  start()   ──▶ start_game request                            │
//! │  reset()   ──▶ epoch bump, everything back to initial        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded and cooperative: the caller feeds events in arrival
//! order and calls [`Battle::tick`] when the scheduler's next due time
//! passes. Nothing here blocks.

pub mod event;
pub mod grid;
pub mod lifecycle;
pub mod log;
pub mod turn;

use std::time::Instant;

pub use event::{ClientRequest, ServerEvent, TurnPayload, DEFAULT_PARSING_METHOD};
pub use grid::{Cell, Classification, Grid, Player, Row, DEFAULT_MAX_TURNS, WORD_LENGTH};
pub use lifecycle::{
    Announcement, FinishPresentation, MatchState, Phase, PlayerPanel, StartError, StatusTone,
    Winner, CELEBRATION_EMOJIS, HIDDEN_WORD,
};
pub use log::{
    BattleLog, LogConfig, LogEntry, LogKind, RawBlock, CANONICAL_PARSING_METHOD, WELCOME_MESSAGE,
};
pub use turn::{
    decode_feedback, FeedbackSymbol, RevealScheduler, ScheduledReveal, TurnError, TurnOutcome,
    TurnRenderer, REVEAL_STEP,
};

/// Initial status line.
const STATUS_READY: &str = "Ready to Start";

/// The spectator display's state engine for one match at a time.
///
/// Owns the authoritative [`MatchState`], both grids, the log, and the
/// reveal scheduler. Inbound events go through [`Battle::handle`]; the
/// start/reset/dismiss affordances are methods; outbound requests are
/// returned as values for the transport layer to deliver.
#[derive(Debug)]
pub struct Battle {
    state: MatchState,
    grid_one: Grid,
    grid_two: Grid,
    log: BattleLog,
    scheduler: RevealScheduler,
    panel_one: PlayerPanel,
    panel_two: PlayerPanel,
    status: String,
    announcement: Option<Announcement>,
    celebrating: bool,
    /// Bumped on reset; reveals scheduled under an older epoch no-op.
    epoch: u64,
}

impl Default for Battle {
    fn default() -> Self {
        Self::new()
    }
}

impl Battle {
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    pub fn with_config(config: LogConfig) -> Self {
        Self {
            state: MatchState::default(),
            grid_one: Grid::default(),
            grid_two: Grid::default(),
            log: BattleLog::new(config),
            scheduler: RevealScheduler::new(),
            panel_one: PlayerPanel::default(),
            panel_two: PlayerPanel::default(),
            status: STATUS_READY.to_string(),
            announcement: None,
            celebrating: false,
            epoch: 0,
        }
    }

    // -- user-facing affordances ------------------------------------------

    /// Request a new match. Valid only while idle; re-entry stays disabled
    /// until the engine confirms the start or reports an error.
    pub fn start(&mut self) -> Result<ClientRequest, StartError> {
        if !self.state.phase.can_start() {
            return Err(StartError {
                phase: self.state.phase,
            });
        }
        self.state.phase = Phase::Starting;
        self.panel_one.set("Preparing...", StatusTone::Thinking);
        self.panel_two.set("Preparing...", StatusTone::Thinking);
        tracing::debug!("start requested");
        Ok(ClientRequest::StartGame)
    }

    /// Clear everything back to the initial display. Valid from any state.
    ///
    /// Bumps the match epoch, so reveals still in flight from the previous
    /// match become no-ops instead of corrupting the fresh grids.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = MatchState::default();
        self.grid_one.reset(DEFAULT_MAX_TURNS);
        self.grid_two.reset(DEFAULT_MAX_TURNS);
        self.log.reset();
        self.panel_one = PlayerPanel::default();
        self.panel_two = PlayerPanel::default();
        self.status = STATUS_READY.to_string();
        self.announcement = None;
        self.celebrating = false;
        tracing::debug!(epoch = self.epoch, "display reset");
    }

    /// Dismiss the winner announcement.
    pub fn dismiss_announcement(&mut self) {
        self.announcement = None;
    }

    pub fn can_start(&self) -> bool {
        self.state.phase.can_start()
    }

    pub fn can_reset(&self) -> bool {
        self.state.phase.has_started()
    }

    // -- transport lifecycle hooks ----------------------------------------

    /// The channel to the engine came up.
    pub fn channel_connected(&mut self) {
        self.status = "Connected to server".to_string();
    }

    /// The channel dropped. Match state is kept; reconnection is the
    /// transport's concern.
    pub fn channel_disconnected(&mut self) {
        self.status = "Disconnected from server".to_string();
    }

    // -- event router ------------------------------------------------------

    /// Process one inbound event. Events must be fed in arrival order.
    pub fn handle(&mut self, event: ServerEvent, now: Instant) {
        match event {
            ServerEvent::Connected { status } => {
                self.log.append(LogKind::System, "System", &status);
            }
            ServerEvent::GameStarted { status, max_turns } => {
                // Reveals scheduled before this point belong to the old
                // match; a restart may also shrink the grids, so they must
                // not reach set_classification.
                self.epoch += 1;
                self.state.phase = Phase::Running;
                self.state.max_turns = max_turns;
                self.state.current_turn = 0;
                self.grid_one.reset(max_turns as usize);
                self.grid_two.reset(max_turns as usize);
                self.status = "Battle in progress!".to_string();
                self.log.append(LogKind::System, "System", &status);
            }
            ServerEvent::StatusUpdate {
                status,
                turn,
                max_turns,
            } => {
                self.state.current_turn = turn;
                self.state.max_turns = max_turns;
                if status.contains("Getting guesses") {
                    self.panel_one.set("Thinking...", StatusTone::Thinking);
                    self.panel_two.set("Thinking...", StatusTone::Thinking);
                }
                self.status = status;
            }
            ServerEvent::PlayerTurn(payload) => self.handle_turn(&payload, now),
            ServerEvent::GameFinished {
                winner,
                secret_word,
                total_turns,
            } => self.finish(&winner, secret_word, total_turns),
            ServerEvent::Error { message } => {
                tracing::warn!(%message, "engine reported an error");
                self.log.append(LogKind::Error, "Error", &message);
                self.status = "Error occurred".to_string();
                // A failed start re-enables the start affordance; an error
                // mid-match leaves the match running.
                if self.state.phase == Phase::Starting {
                    self.state.phase = Phase::Idle;
                }
            }
        }
    }

    fn handle_turn(&mut self, payload: &TurnPayload, now: Instant) {
        let grid = match Player::from_name(&payload.player) {
            Some(Player::One) => &mut self.grid_one,
            Some(Player::Two) => &mut self.grid_two,
            // Let the renderer produce the error so every rejection takes
            // the same logging path.
            None => &mut self.grid_one,
        };
        let mut renderer = TurnRenderer {
            grid,
            log: &mut self.log,
            scheduler: &mut self.scheduler,
            state: &mut self.state,
        };
        match renderer.render(payload, now, self.epoch) {
            Ok(outcome) => {
                let panel = match outcome.player {
                    Player::One => &mut self.panel_one,
                    Player::Two => &mut self.panel_two,
                };
                if outcome.winning {
                    panel.set("WINNER! 🎉", StatusTone::Winner);
                } else {
                    panel.set(format!("Guessed: {}", outcome.guess), StatusTone::Neutral);
                }
            }
            Err(err) => {
                tracing::warn!(%err, player = %payload.player, turn = payload.turn,
                    "dropped malformed turn event");
                self.log.append(LogKind::Error, "Error", &err.to_string());
            }
        }
    }

    fn finish(&mut self, winner: &str, secret_word: String, total_turns: u32) {
        let winner = Winner::from_wire(winner);
        self.state.phase = Phase::Finished;
        self.state.winner = Some(winner);
        self.state.secret_word = Some(secret_word);

        let word = self.state.secret_word.as_deref().unwrap_or_default();
        let presentation = winner.presentation(word, total_turns);
        self.status = presentation.status;
        self.panel_one = presentation.player_one;
        self.panel_two = presentation.player_two;
        self.announcement = Some(presentation.announcement.clone());
        self.celebrating = presentation.celebrate;
        self.log.append(
            LogKind::Result,
            "Battle Result",
            &presentation.announcement.details,
        );
    }

    // -- scheduler ---------------------------------------------------------

    /// Run every reveal due at `now` and return the diagnostic `log_event`
    /// requests they produce, one per revealed letter.
    ///
    /// Reveals carrying a stale epoch (scheduled before the last reset) are
    /// discarded without touching state.
    pub fn tick(&mut self, now: Instant) -> Vec<ClientRequest> {
        let mut requests = Vec::new();
        for reveal in self.scheduler.take_due(now) {
            if reveal.epoch != self.epoch {
                tracing::debug!(
                    player = %reveal.player, row = reveal.row, col = reveal.col,
                    "dropping reveal from a previous match"
                );
                continue;
            }
            requests.push(ClientRequest::LogEvent {
                message: format!(
                    "[Turn {}] [Player: {}] Processing feedback char: {}",
                    reveal.turn,
                    reveal.player,
                    reveal.symbol.as_str()
                ),
            });
            match reveal.symbol.classification() {
                Some(classification) => {
                    let grid = match reveal.player {
                        Player::One => &mut self.grid_one,
                        Player::Two => &mut self.grid_two,
                    };
                    grid.set_classification(reveal.row, reveal.col, classification);
                }
                None => {
                    tracing::warn!(
                        symbol = reveal.symbol.as_str(),
                        player = %reveal.player,
                        turn = reveal.turn,
                        "unknown feedback symbol, cell left unclassified"
                    );
                }
            }
        }
        requests
    }

    /// When [`Battle::tick`] next has work to do.
    pub fn next_reveal_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    // -- read access -------------------------------------------------------

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn grid(&self, player: Player) -> &Grid {
        match player {
            Player::One => &self.grid_one,
            Player::Two => &self.grid_two,
        }
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Mutable log access for display-side interactions (raw-block toggles).
    pub fn log_mut(&mut self) -> &mut BattleLog {
        &mut self.log
    }

    pub fn panel(&self, player: Player) -> &PlayerPanel {
        match player {
            Player::One => &self.panel_one,
            Player::Two => &self.panel_two,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Full display snapshot for clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "match": self.state.to_json(),
            "status": self.status,
            "grids": {
                "player1": self.grid_one.to_json(),
                "player2": self.grid_two.to_json()
            },
            "panels": {
                "player1": {"status": self.panel_one.status, "tone": self.panel_one.tone.as_str()},
                "player2": {"status": self.panel_two.status, "tone": self.panel_two.tone.as_str()}
            },
            "log": self.log.to_json(),
            "announcement": self.announcement.as_ref().map(|a| serde_json::json!({
                "headline": a.headline,
                "details": a.details
            })),
            "celebrating": self.celebrating
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turn_event(player: &str, guess: &str, feedback: &str, turn: u32) -> ServerEvent {
        ServerEvent::PlayerTurn(TurnPayload {
            player: player.to_string(),
            guess: guess.to_string(),
            feedback: feedback.to_string(),
            turn,
            comments: String::new(),
            raw_response: String::new(),
            parsing_method: None,
        })
    }

    fn started_battle(max_turns: u32) -> Battle {
        let mut battle = Battle::new();
        battle.start().unwrap();
        battle.handle(
            ServerEvent::GameStarted {
                status: "Game started!".to_string(),
                max_turns,
            },
            Instant::now(),
        );
        battle
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut battle = Battle::new();
        assert!(battle.can_start());

        let request = battle.start().unwrap();
        assert_eq!(request, ClientRequest::StartGame);
        assert_eq!(battle.state().phase, Phase::Starting);
        assert_eq!(battle.panel(Player::One).tone, StatusTone::Thinking);
        // Still waiting on the engine's acknowledgement, so nothing to reset.
        assert!(!battle.can_reset());

        // No double-start while pending.
        let err = battle.start().unwrap_err();
        assert_eq!(err.phase, Phase::Starting);
    }

    #[test]
    fn test_game_started_transitions_to_running() {
        // Scenario A.
        let battle = started_battle(6);
        assert_eq!(battle.state().phase, Phase::Running);
        assert_eq!(battle.state().current_turn, 0);
        assert_eq!(battle.state().max_turns, 6);
        assert_eq!(battle.status(), "Battle in progress!");
        assert_eq!(battle.log().latest().unwrap().content, "Game started!");
        assert!(!battle.can_start());
    }

    #[test]
    fn test_player_turn_end_to_end() {
        // Scenario B.
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩⬜⬜🟨⬜", 1), now);

        let row = battle.grid(Player::One).row(0);
        assert_eq!(row.letters(), vec!['C', 'R', 'A', 'N', 'E']);
        assert_eq!(
            battle.log().latest().unwrap().content,
            "Turn 1: \"CRANE\" → 🟩⬜⬜🟨⬜"
        );
        assert_eq!(battle.state().current_turn, 1);
        assert_eq!(battle.panel(Player::One).status, "Guessed: CRANE");

        // Run all five reveals.
        let requests = battle.tick(now + REVEAL_STEP * 5);
        assert_eq!(requests.len(), 5);
        assert_eq!(
            requests[0],
            ClientRequest::LogEvent {
                message: "[Turn 1] [Player: Player 1] Processing feedback char: 🟩".to_string()
            }
        );

        let classifications: Vec<Classification> = battle
            .grid(Player::One)
            .row(0)
            .cells()
            .iter()
            .map(|c| c.classification)
            .collect();
        assert_eq!(
            classifications,
            vec![
                Classification::Correct,
                Classification::Absent,
                Classification::Absent,
                Classification::Present,
                Classification::Absent
            ]
        );
    }

    #[test]
    fn test_reveals_are_staggered() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩🟩🟩🟩🟩", 1), now);

        assert_eq!(battle.next_reveal_due(), Some(now + REVEAL_STEP));

        // After two steps only the first two cells are classified.
        let requests = battle.tick(now + REVEAL_STEP * 2);
        assert_eq!(requests.len(), 2);
        let cells = battle.grid(Player::One).row(0).cells().to_owned();
        assert_eq!(cells[0].classification, Classification::Correct);
        assert_eq!(cells[1].classification, Classification::Correct);
        assert_eq!(cells[2].classification, Classification::Unset);
    }

    #[test]
    fn test_winning_turn_flags_panel_before_reveal() {
        let mut battle = started_battle(6);
        battle.handle(turn_event("Player 2", "GRAPE", "🟩🟩🟩🟩🟩", 1), Instant::now());

        // Status flips immediately; coloring is still pending.
        assert_eq!(battle.panel(Player::Two).status, "WINNER! 🎉");
        assert_eq!(battle.panel(Player::Two).tone, StatusTone::Winner);
        assert_eq!(
            battle.grid(Player::Two).row(0).cells()[0].classification,
            Classification::Unset
        );
    }

    #[test]
    fn test_out_of_order_turn_rejected() {
        // Scenario D.
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "⬜⬜⬜⬜⬜", 1), now);
        let log_len = battle.log().len();

        battle.handle(turn_event("Player 1", "SLATE", "⬜⬜⬜⬜⬜", 3), now);

        assert!(!battle.grid(Player::One).row(1).is_filled());
        assert!(!battle.grid(Player::One).row(2).is_filled());
        assert_eq!(battle.log().len(), log_len + 1);
        let entry = battle.log().latest().unwrap();
        assert_eq!(entry.kind, LogKind::Error);
        assert_eq!(entry.content, "Turn 3 out of order: expected turn 2");
        // The display stays interactive.
        assert_eq!(battle.state().phase, Phase::Running);
    }

    #[test]
    fn test_turns_interleave_across_players_and_rows() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "⬜⬜⬜⬜⬜", 1), now);
        battle.handle(turn_event("Player 2", "SLATE", "🟨⬜⬜⬜⬜", 1), now);

        // Player 1's second turn arrives before the first row's reveals ran.
        battle.handle(
            turn_event("Player 1", "MOIST", "⬜🟩⬜⬜⬜", 2),
            now + REVEAL_STEP / 2,
        );
        assert!(battle.grid(Player::One).row(1).is_filled());

        let requests = battle.tick(now + REVEAL_STEP * 10);
        assert_eq!(requests.len(), 15);
        assert_eq!(
            battle.grid(Player::One).row(1).cells()[1].classification,
            Classification::Correct
        );
        assert_eq!(
            battle.grid(Player::Two).row(0).cells()[0].classification,
            Classification::Present
        );
    }

    #[test]
    fn test_game_finished_tie() {
        // Scenario C.
        let mut battle = started_battle(6);
        battle.handle(
            ServerEvent::GameFinished {
                winner: "Tie".to_string(),
                secret_word: "GRAPE".to_string(),
                total_turns: 4,
            },
            Instant::now(),
        );

        assert_eq!(battle.state().phase, Phase::Finished);
        assert_eq!(battle.state().secret_word.as_deref(), Some("GRAPE"));
        assert_eq!(battle.state().winner, Some(Winner::Tie));
        assert_eq!(battle.state().secret_word_display(), "GRAPE");
        assert_eq!(battle.panel(Player::One).status, "TIE! 🤝");
        assert_eq!(battle.panel(Player::Two).status, "TIE! 🤝");
        assert!(battle.is_celebrating());
        assert!(battle.can_reset());

        let entry = battle.log().latest().unwrap();
        assert_eq!(entry.kind, LogKind::Result);
        assert_eq!(entry.sender, "Battle Result");
        assert_eq!(entry.content, "Both players guessed \"GRAPE\" on turn 4!");

        let announcement = battle.announcement().unwrap();
        assert_eq!(announcement.headline, "🤝 It's a Tie!");
        battle.dismiss_announcement();
        assert!(battle.announcement().is_none());
    }

    #[test]
    fn test_no_winner_skips_celebration() {
        let mut battle = started_battle(6);
        battle.handle(
            ServerEvent::GameFinished {
                winner: "No winner".to_string(),
                secret_word: "GRAPE".to_string(),
                total_turns: 6,
            },
            Instant::now(),
        );
        assert!(!battle.is_celebrating());
        assert_eq!(battle.panel(Player::One).tone, StatusTone::Loser);
    }

    #[test]
    fn test_error_while_starting_reenables_start() {
        let mut battle = Battle::new();
        battle.start().unwrap();
        battle.handle(
            ServerEvent::Error {
                message: "Failed to start game".to_string(),
            },
            Instant::now(),
        );

        assert_eq!(battle.state().phase, Phase::Idle);
        assert!(battle.can_start());
        assert_eq!(battle.status(), "Error occurred");
        assert_eq!(battle.log().latest().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn test_error_mid_match_is_non_fatal() {
        let mut battle = started_battle(6);
        battle.handle(
            ServerEvent::Error {
                message: "Player 2 request timed out".to_string(),
            },
            Instant::now(),
        );

        // The match keeps running and further turns are accepted.
        assert_eq!(battle.state().phase, Phase::Running);
        battle.handle(turn_event("Player 1", "CRANE", "⬜⬜⬜⬜⬜", 1), Instant::now());
        assert!(battle.grid(Player::One).row(0).is_filled());
    }

    #[test]
    fn test_status_update_flips_panels_to_thinking() {
        let mut battle = started_battle(6);
        battle.handle(
            ServerEvent::StatusUpdate {
                status: "Turn 2: Getting guesses from both players...".to_string(),
                turn: 2,
                max_turns: 6,
            },
            Instant::now(),
        );
        assert_eq!(battle.state().current_turn, 2);
        assert_eq!(battle.state().turn_counter(), "2/6");
        assert_eq!(battle.panel(Player::One).status, "Thinking...");
        assert_eq!(battle.panel(Player::Two).tone, StatusTone::Thinking);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩🟩🟩🟩🟩", 1), now);
        battle.handle(
            ServerEvent::GameFinished {
                winner: "Player 1".to_string(),
                secret_word: "CRANE".to_string(),
                total_turns: 1,
            },
            now,
        );

        battle.reset();

        assert_eq!(*battle.state(), MatchState::default());
        assert!(battle.grid(Player::One).is_empty());
        assert!(battle.grid(Player::Two).is_empty());
        assert_eq!(battle.log().len(), 1);
        assert_eq!(battle.log().latest().unwrap().content, WELCOME_MESSAGE);
        assert_eq!(battle.status(), "Ready to Start");
        assert!(battle.announcement().is_none());
        assert!(!battle.is_celebrating());
        assert!(battle.can_start());
        assert!(!battle.can_reset());
    }

    #[test]
    fn test_stale_reveals_noop_after_reset() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩🟩🟩🟩🟩", 1), now);

        // Reset while all five reveals are still in flight.
        battle.reset();
        let requests = battle.tick(now + REVEAL_STEP * 5);

        assert!(requests.is_empty());
        assert!(battle.grid(Player::One).is_empty());
    }

    #[test]
    fn test_game_started_discards_pending_reveals() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩⬜⬜🟨⬜", 1), now);
        battle.handle(turn_event("Player 1", "SLATE", "⬜⬜⬜⬜⬜", 2), now);
        battle.handle(turn_event("Player 1", "MOIST", "⬜⬜⬜⬜⬜", 3), now);
        battle.handle(turn_event("Player 1", "PLANT", "⬜⬜⬜⬜⬜", 4), now);

        // A new match begins, with smaller grids, while the reveals for
        // rows 0-3 are still in flight.
        battle.handle(
            ServerEvent::GameStarted {
                status: "Game started!".to_string(),
                max_turns: 3,
            },
            now,
        );

        // The stale reveals run out without touching the fresh grids, even
        // though their row indices no longer exist.
        let requests = battle.tick(now + REVEAL_STEP * 10);
        assert!(requests.is_empty());
        assert!(battle.grid(Player::One).is_empty());
        assert_eq!(battle.grid(Player::One).max_turns(), 3);

        // The new match accepts turns and reveals normally.
        battle.handle(turn_event("Player 2", "GRAPE", "🟩🟩🟩🟩🟩", 1), now);
        let requests = battle.tick(now + REVEAL_STEP * 10);
        assert_eq!(requests.len(), 5);
        assert_eq!(
            battle.grid(Player::Two).row(0).cells()[0].classification,
            Classification::Correct
        );
    }

    #[test]
    fn test_unknown_symbol_reveals_skip_classification() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩🟦🟩🟩🟩", 1), now);

        // Not a winning row: one symbol is unrecognized.
        assert_eq!(battle.panel(Player::One).status, "Guessed: CRANE");

        let requests = battle.tick(now + REVEAL_STEP * 5);
        // The diagnostic echo still covers all five symbols.
        assert_eq!(requests.len(), 5);

        let cells = battle.grid(Player::One).row(0).cells().to_owned();
        assert_eq!(cells[0].classification, Classification::Correct);
        assert_eq!(cells[1].classification, Classification::Unset);
        assert_eq!(cells[2].classification, Classification::Correct);
    }

    #[test]
    fn test_connected_event_and_channel_hooks() {
        let mut battle = Battle::new();
        battle.channel_connected();
        assert_eq!(battle.status(), "Connected to server");

        battle.handle(
            ServerEvent::Connected {
                status: "Connected to LLM Wordle Battle server".to_string(),
            },
            Instant::now(),
        );
        assert_eq!(
            battle.log().latest().unwrap().content,
            "Connected to LLM Wordle Battle server"
        );

        // A dropped channel surfaces in the status line but keeps state.
        let mut battle = started_battle(6);
        battle.channel_disconnected();
        assert_eq!(battle.status(), "Disconnected from server");
        assert_eq!(battle.state().phase, Phase::Running);
    }

    #[test]
    fn test_snapshot_json() {
        let mut battle = started_battle(6);
        let now = Instant::now();
        battle.handle(turn_event("Player 1", "CRANE", "🟩⬜⬜🟨⬜", 1), now);
        battle.tick(now + REVEAL_STEP * 5);

        let json = battle.to_json();
        assert_eq!(json["match"]["phase"], "running");
        assert_eq!(json["match"]["secret_word"], HIDDEN_WORD);
        assert_eq!(json["status"], "Battle in progress!");
        assert_eq!(json["grids"]["player1"][0][0]["letter"], "C");
        assert_eq!(json["grids"]["player1"][0][0]["classification"], "correct");
        assert_eq!(json["panels"]["player1"]["status"], "Guessed: CRANE");
        assert_eq!(json["celebrating"], false);
    }
}
