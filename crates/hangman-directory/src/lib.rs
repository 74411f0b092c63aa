//! The directory of live Hangman games.
//!
//! Each game is a [`Session`](hangman_session::Session) registered under
//! a random [`GameId`](hangman_protocol::GameId). The directory:
//!
//! 1. **Creates** games from a random word ([`WordSource`]) or a custom one
//! 2. **Routes** guesses to the right game, one guess per game at a time
//! 3. **Evicts** games that went idle, finished games sooner than running ones
//!
//! # Concurrency
//!
//! ```text
//! RwLock<HashMap<GameId, Arc<Entry>>>   ← held only to find/insert/remove
//!                          │
//!                          └─ Entry { RwLock<Session>, last_activity }
//!                                       ↑ write: guess   read: snapshot
//! ```
//!
//! Guesses on different games never wait on each other; guesses on the
//! same game are serialized by that game's own lock.

#![allow(async_fn_in_trait)]

mod config;
mod directory;
mod error;
mod sweeper;
mod words;

pub use config::DirectoryConfig;
pub use directory::Directory;
pub use error::DirectoryError;
pub use sweeper::spawn_sweeper;
pub use words::{DictionaryFile, WordList, WordSource, is_playable};
