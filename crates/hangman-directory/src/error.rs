//! Error types for the directory layer.

use hangman_protocol::{GameId, Language};
use hangman_session::SessionError;

/// Errors that can occur while creating, finding or playing a game.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No game is registered under this id. Either it never existed or
    /// it was evicted.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The game itself refused: unusable word, game over, or a guess
    /// that isn't a letter.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The word source has nothing playable for this language.
    #[error("no words available for language {0}")]
    NoWords(Language),

    /// Reading a dictionary failed.
    #[error("dictionary I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
