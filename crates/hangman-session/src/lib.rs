//! The Hangman game session.
//!
//! A [`Session`] is one game: a secret word, the letters revealed so far,
//! the characters already guessed and the mistakes made. It is plain
//! state plus transition logic, with no locking and no I/O; the
//! directory crate owns sessions and serializes access to them.
//!
//! # How it fits in the stack
//!
//! ```text
//! Directory (above)  ← creates sessions, looks them up by GameId
//!     ↕
//! Session (this crate)  ← evaluates guesses, decides win/loss
//!     ↕
//! Protocol (below)  ← provides GameId, GameStatus, GameSnapshot
//! ```

mod config;
mod error;
mod session;

pub use config::{DEFAULT_MAX_MISTAKES, SessionConfig};
pub use error::SessionError;
pub use session::{Session, normalize};
