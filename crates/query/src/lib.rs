//! Interpretation of user input lines.
//!
//! Turns one line typed at the prompt into a command:
//! - the exit sentinel ends the session
//! - blank input is rejected before it reaches the engine
//! - anything else is a gift query

use giftwise_features::normalize_text;
use thiserror::Error;

/// Normalized words that end an interactive session.
pub const EXIT_SENTINELS: &[&str] = &["exit", "quit"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Empty query text")]
    EmptyQuery,
}

/// A gift the user asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftQuery {
    /// Gift name with surrounding whitespace removed
    pub text: String,
}

impl GiftQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Gift(GiftQuery),
    Exit,
}

/// True when the text asks to end the session, ignoring case, accents and
/// punctuation.
pub fn is_exit_sentinel(text: &str) -> bool {
    EXIT_SENTINELS.contains(&normalize_text(text).as_str())
}

/// Interpret one line of input.
pub fn parse_input(line: &str) -> Result<Command, QueryError> {
    if is_exit_sentinel(line) {
        return Ok(Command::Exit);
    }

    let text = line.trim();
    if text.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    Ok(Command::Gift(GiftQuery::new(text)))
}
