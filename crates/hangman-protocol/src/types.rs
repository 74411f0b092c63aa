//! Core protocol types of the Hangman engine.
//!
//! These are the structures that cross the boundary between the engine
//! and its presentation layer: identifiers, the public view of a game,
//! and the request/response envelopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// The character shown in a masked word for a letter not yet guessed.
pub const MASK_PLACEHOLDER: char = '_';

// ---------------------------------------------------------------------------
// GameId
// ---------------------------------------------------------------------------

/// A unique identifier for a game session.
///
/// A newtype around 128 random bits, so a `GameId` can't be mixed up with
/// any other number and guessing a live id is infeasible.
///
/// On the wire it travels as 32 lowercase hex characters. A raw `u128`
/// would not survive JavaScript's number type, hence the
/// `into`/`try_from` string conversion instead of `#[serde(transparent)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GameId(pub u128);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for GameId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ProtocolError::InvalidMessage(format!(
                "game id must be 32 hex digits, got {s:?}"
            )));
        }
        u128::from_str_radix(s, 16)
            .map(GameId)
            .map_err(|e| ProtocolError::InvalidMessage(e.to_string()))
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for GameId {
    type Error = ProtocolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// The language a random word is drawn from.
///
/// The wire codes (`"ENG"`, `"GER"`) are the ones the web client already
/// sends as its `lang` parameter. The locale names the dictionary file a
/// word source reads (`en_US.dict`, `de_DE.dict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ENG")]
    English,
    #[serde(rename = "GER")]
    German,
}

impl Language {
    /// Every supported language, in a stable order.
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    /// The short wire code (`ENG`, `GER`).
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "ENG",
            Self::German => "GER",
        }
    }

    /// The locale, which is also the dictionary file stem.
    pub fn locale(self) -> &'static str {
        match self {
            Self::English => "en_US",
            Self::German => "de_DE",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ProtocolError;

    /// Accepts the wire code, the locale, or the two-letter language
    /// (`ENG`, `en_US`, `en`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eng" | "en" | "en_us" | "english" => Ok(Self::English),
            "ger" | "de" | "de_de" | "german" | "deutsch" => Ok(Self::German),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown language {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Where a game stands.
///
/// ```text
///   InProgress ──(last letter revealed)──→ Solved
///        │
///        └──────(mistake limit reached)──→ Failed
/// ```
///
/// `Solved` and `Failed` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    InProgress,
    Solved,
    Failed,
}

impl GameStatus {
    /// Returns `true` once the game accepts no more guesses.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::InProgress, Self::Solved) | (Self::InProgress, Self::Failed)
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Solved => write!(f, "SOLVED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots and outcomes
// ---------------------------------------------------------------------------

/// The public view of a game. Never contains the secret word.
///
/// Field names are camelCase because that is what the web client reads
/// (`game.maskedWord`, `game.mistakeCount`, `game.solved`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: GameId,

    /// The word with every unguessed letter replaced by
    /// [`MASK_PLACEHOLDER`], e.g. `"h_ll_"`.
    pub masked_word: String,

    pub mistake_count: u32,

    /// The mistake limit this game enforces.
    pub max_mistakes: u32,

    pub status: GameStatus,

    /// Mirrors `status == Solved`. Kept as its own field because clients
    /// written against the older contract only look at this flag.
    pub solved: bool,

    /// Every character guessed so far, alphabetically.
    #[serde(default)]
    pub guessed: Vec<char>,
}

impl GameSnapshot {
    /// How many more wrong guesses the player can afford.
    pub fn remaining_mistakes(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistake_count)
    }

    /// The masked word with a blank between characters (`"h _ l l _"`),
    /// which is easier to count on a terminal.
    pub fn spaced_mask(&self) -> String {
        let mut out = String::with_capacity(self.masked_word.len() * 2);
        for (i, c) in self.masked_word.chars().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

/// The result of one guess: was it right, and what does the game look
/// like now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub correct: bool,
    pub game: GameSnapshot,
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// Everything a presentation layer can ask of the engine.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{ "type": "Guess", "id": "…", "character": "e" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Start a game with a random word. `lang` defaults to English.
    Generate {
        #[serde(default)]
        lang: Language,
    },

    /// Start a game with a caller-supplied word.
    Create { word: String },

    /// Fetch the current snapshot of a game.
    Get { id: GameId },

    /// Guess one character. `character` is a string because that is what
    /// form fields produce; it must hold exactly one character
    /// (see [`guess_char`]).
    Guess { id: GameId, character: String },
}

/// What the engine answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Answer to `Generate`, `Create` and `Get`.
    Game { game: GameSnapshot },

    /// Answer to `Guess`.
    Guess { correct: bool, game: GameSnapshot },

    /// Something went wrong. `code` follows HTTP conventions
    /// (404 unknown game, 409 game over, 422 unusable input, ...).
    Error { code: u16, message: String },
}

impl From<GuessOutcome> for Response {
    fn from(outcome: GuessOutcome) -> Self {
        Self::Guess {
            correct: outcome.correct,
            game: outcome.game,
        }
    }
}

impl From<GameSnapshot> for Response {
    fn from(game: GameSnapshot) -> Self {
        Self::Game { game }
    }
}

/// Extracts the single character of a guess field.
///
/// Surrounding whitespace is ignored, so `" e\n"` is a guess of `'e'`.
///
/// # Errors
/// Returns [`ProtocolError::InvalidMessage`] unless exactly one character
/// remains.
pub fn guess_char(character: &str) -> Result<char, ProtocolError> {
    let mut chars = character.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ProtocolError::InvalidMessage(format!(
            "a guess must be exactly one character, got {character:?}"
        ))),
    }
}

// =========================================================================
// Tests
// =========================================================================
