//! Battle log pipeline.
//!
//! An append-only, insertion-ordered log of human-readable entries plus
//! optional collapsible raw-response attachments. Entries are never mutated
//! after creation; the only way to remove anything is a whole-log reset.

use std::fmt;

/// Welcome entry restored by every reset.
pub const WELCOME_MESSAGE: &str =
    "Welcome to LLM Wordle Battle! Click \"Start Battle\" to watch two AI models compete.";

/// Parsing method treated as the unremarkable default; any other method is
/// called out in the composed turn line.
pub const CANONICAL_PARSING_METHOD: &str = "GUESS: format";

/// Log entry categories. Drives the display styling of each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    System,
    PlayerOne,
    PlayerTwo,
    Result,
    Error,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::PlayerOne => "player1",
            Self::PlayerTwo => "player2",
            Self::Result => "winner",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw model response attached to an entry for diagnostic inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub text: String,
    pub parsing_method: String,
    pub collapsed: bool,
}

/// One log entry. Content is fixed at append time; only the raw block's
/// collapsed flag may toggle afterwards.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub kind: LogKind,
    pub sender: String,
    pub content: String,
    pub raw: Option<RawBlock>,
    pub at: chrono::DateTime<chrono::Utc>,
}

impl LogEntry {
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "kind": self.kind.as_str(),
            "sender": self.sender,
            "content": self.content,
            "at": self.at.to_rfc3339()
        });
        if let Some(raw) = &self.raw {
            obj["raw"] = serde_json::json!({
                "text": raw.text,
                "parsing_method": raw.parsing_method,
                "collapsed": raw.collapsed
            });
        }
        obj
    }
}

/// Knobs for the turn-line suppression rules. The original frontend's exact
/// comparison semantics are unobserved, so they stay configurable here
/// rather than hard-coded.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Parsing method that needs no `[Parsed via: ...]` callout.
    pub canonical_parsing_method: String,
    /// Trim whitespace before comparing comments to the raw response.
    pub trim_comments: bool,
    /// Ignore case when comparing comments to the raw response.
    pub ignore_comment_case: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            canonical_parsing_method: CANONICAL_PARSING_METHOD.to_string(),
            trim_comments: false,
            ignore_comment_case: false,
        }
    }
}

impl LogConfig {
    /// Whether comments should be appended to the turn line.
    fn comments_distinct(&self, comments: &str, raw_response: &str) -> bool {
        if comments.is_empty() {
            return false;
        }
        let (mut a, mut b) = (comments.to_string(), raw_response.to_string());
        if self.trim_comments {
            a = a.trim().to_string();
            b = b.trim().to_string();
        }
        if self.ignore_comment_case {
            a = a.to_lowercase();
            b = b.to_lowercase();
        }
        !a.is_empty() && a != b
    }

    /// Compose the human-readable line for one turn.
    ///
    /// `Turn {n}: "{GUESS}" → {feedback}`, then `[Parsed via: {method}]`
    /// only when a parsing method was reported and differs from the
    /// canonical one, then `| {comments}` only when comments are present
    /// and distinct from the raw response. Repeated calls with identical
    /// inputs produce byte-identical output.
    pub fn compose_turn_message(
        &self,
        turn: u32,
        guess: &str,
        feedback: &str,
        comments: &str,
        raw_response: &str,
        parsing_method: Option<&str>,
    ) -> String {
        let mut message = format!("Turn {}: \"{}\" → {}", turn, guess, feedback);
        if let Some(method) = parsing_method {
            if method != self.canonical_parsing_method {
                message.push_str(&format!(" [Parsed via: {}]", method));
            }
        }
        if self.comments_distinct(comments, raw_response) {
            message.push_str(&format!(" | {}", comments));
        }
        message
    }
}

/// The battle log. Append-only; display order equals insertion order, and
/// the display surface follows the newest entry.
#[derive(Debug)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
    config: LogConfig,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl BattleLog {
    pub fn new(config: LogConfig) -> Self {
        let mut log = Self {
            entries: Vec::new(),
            config,
        };
        log.append(LogKind::System, "System", WELCOME_MESSAGE);
        log
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Append an entry. Always succeeds.
    pub fn append(&mut self, kind: LogKind, sender: &str, content: &str) {
        self.entries.push(LogEntry {
            kind,
            sender: sender.to_string(),
            content: content.to_string(),
            raw: None,
            at: chrono::Utc::now(),
        });
    }

    /// Append an entry carrying a default-collapsed raw-response block.
    pub fn append_raw(&mut self, kind: LogKind, sender: &str, text: &str, parsing_method: &str) {
        self.entries.push(LogEntry {
            kind,
            sender: format!("{} Raw Response", sender),
            content: String::new(),
            raw: Some(RawBlock {
                text: text.to_string(),
                parsing_method: parsing_method.to_string(),
                collapsed: true,
            }),
            at: chrono::Utc::now(),
        });
    }

    /// Toggle a raw block's collapsed flag. No-op for entries without one.
    pub fn toggle_raw(&mut self, index: usize) {
        if let Some(raw) = self.entries.get_mut(index).and_then(|e| e.raw.as_mut()) {
            raw.collapsed = !raw.collapsed;
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry, the one the display surface should be showing.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Truncate back to the single welcome entry.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.append(LogKind::System, "System", WELCOME_MESSAGE);
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.entries.iter().map(|e| e.to_json()).collect())
    }
}
