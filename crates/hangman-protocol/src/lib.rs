//! Shared vocabulary of the Hangman engine.
//!
//! This crate defines what the engine and its callers exchange:
//!
//! - **Types** ([`GameId`], [`GameSnapshot`], [`GuessOutcome`],
//!   [`Request`], [`Response`], etc.) — the structures a presentation
//!   layer sends and receives.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding,
//!   decoding or validating a message.
//!
//! # Architecture
//!
//! ```text
//! Facade (GameService)  ← decodes Requests, encodes Responses
//!     ↕
//! Directory  ← hands out GameSnapshots by GameId
//!     ↕
//! Session    ← produces GuessOutcomes
//!     ↕
//! Protocol (this crate)
//! ```
//!
//! Nothing here knows how a session works; it only knows what a session
//! looks like from the outside. In particular the secret word never
//! appears in any type of this crate.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    GameId, GameSnapshot, GameStatus, GuessOutcome, Language, MASK_PLACEHOLDER, Request, Response,
    guess_char,
};
