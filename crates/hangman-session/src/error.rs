//! Error types for the session layer.

use hangman_protocol::GameId;

/// Errors a single game can report.
///
/// None of these are fatal: the game is left exactly as it was and the
/// caller can show a notice and carry on.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The secret word can't be played: it is empty or has no letter
    /// to guess. The payload says which, never the word itself.
    #[error("invalid word: {0}")]
    InvalidWord(String),

    /// The game is already solved or failed and takes no more guesses.
    #[error("game {0} is over")]
    Closed(GameId),
}
