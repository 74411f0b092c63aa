//! # Hangman
//!
//! A server-side engine for the word-guessing game.
//!
//! The engine keeps every game in a shared, concurrent directory. Callers
//! create a game (random word per language, or a word of their own),
//! guess letters by game id, and read back a masked snapshot. The secret
//! word never leaves the engine while a game is running.
//!
//! ## Layers
//!
//! | crate | role |
//! |-------|------|
//! | `hangman-protocol` | ids, snapshots, requests/responses, codecs |
//! | `hangman-session` | one game's state machine |
//! | `hangman-directory` | live games, word sources, eviction |
//! | `hangman` | this facade: [`GameService`], [`HangmanError`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use hangman::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), HangmanError> {
//! let service = GameService::builder().build(WordList::embedded());
//!
//! let game = service.create_with_word("Rust").await?;
//! let outcome = service.guess(game.id, 'r').await?;
//! assert_eq!(outcome.game.masked_word, "r___");
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::HangmanError;
pub use service::{GameService, GameServiceBuilder};

/// Everything needed to run games, in one import.
pub mod prelude {
    pub use crate::{GameService, GameServiceBuilder, HangmanError};
    pub use hangman_directory::{
        DictionaryFile, Directory, DirectoryConfig, DirectoryError, WordList, WordSource,
        spawn_sweeper,
    };
    pub use hangman_protocol::{
        Codec, GameId, GameSnapshot, GameStatus, GuessOutcome, JsonCodec, Language, ProtocolError,
        Request, Response,
    };
    pub use hangman_session::{Session, SessionConfig, SessionError};
}
