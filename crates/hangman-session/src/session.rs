//! The session type: one game of Hangman.
//!
//! A session tracks:
//! - WHAT is being guessed (the secret word, case-folded)
//! - WHICH positions are visible (letters guessed, plus every non-letter)
//! - WHICH characters were tried, and whether each was right
//! - HOW many mistakes were made, against a fixed limit
//! - WHERE the game stands ([`GameStatus`])

use std::collections::BTreeMap;
use std::fmt;

use hangman_protocol::{GameId, GameSnapshot, GameStatus, GuessOutcome, MASK_PLACEHOLDER};

use crate::{SessionConfig, SessionError};

/// Case-folds a character the way secret words and guesses are compared.
///
/// Characters whose lowercase form is more than one character (e.g. `'İ'`)
/// are kept unchanged so a word never changes length.
pub fn normalize(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// A single game of Hangman.
///
/// Created by [`Session::create`], mutated only through
/// [`Session::guess`], and read-only once its status is terminal.
///
/// `Clone` is derived so a directory can hand out copies; `Debug` is
/// written by hand so logs never print the secret word.
#[derive(Clone)]
pub struct Session {
    id: GameId,

    /// The secret word, case-folded. Kept as both text (for
    /// [`reveal`](Self::reveal)) and chars (for position lookups).
    word: String,
    chars: Vec<char>,

    /// `revealed[i]` is `true` once position `i` is visible. Starts `true`
    /// for every non-letter.
    revealed: Vec<bool>,

    /// Every guessed character with the correctness decided the first
    /// time it was evaluated. `BTreeMap` keeps them alphabetical for
    /// snapshots.
    guessed: BTreeMap<char, bool>,

    mistake_count: u32,
    max_mistakes: u32,
    status: GameStatus,
}

impl Session {
    /// Starts a game for `word` with the given mistake limit.
    ///
    /// The word is trimmed and case-folded. A limit of 0 is raised to 1.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidWord`] if the word is empty or
    /// contains no letter.
    pub fn create(id: GameId, word: &str, max_mistakes: u32) -> Result<Self, SessionError> {
        let word: String = word.trim().chars().map(normalize).collect();
        if word.is_empty() {
            return Err(SessionError::InvalidWord("word is empty".into()));
        }
        if !word.chars().any(char::is_alphabetic) {
            return Err(SessionError::InvalidWord("word contains no letter".into()));
        }

        let chars: Vec<char> = word.chars().collect();
        let revealed = chars.iter().map(|c| !c.is_alphabetic()).collect();
        let config = SessionConfig { max_mistakes }.validated();

        Ok(Self {
            id,
            word,
            chars,
            revealed,
            guessed: BTreeMap::new(),
            mistake_count: 0,
            max_mistakes: config.max_mistakes,
            status: GameStatus::InProgress,
        })
    }

    /// Same as [`create`](Self::create), reading the limit from `config`.
    pub fn with_config(
        id: GameId,
        word: &str,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        Self::create(id, word, config.max_mistakes)
    }

    /// Evaluates one guessed character.
    ///
    /// - A character guessed before is answered from memory: same
    ///   `correct` as the first time, nothing changes.
    /// - A new character is recorded. If the word contains it, every
    ///   matching position is revealed; otherwise one mistake is counted.
    ///   Non-letters follow the same rule: one that appears in the word
    ///   is correct (its positions were visible all along).
    ///
    /// Solving is checked on correct guesses and the mistake limit on
    /// incorrect ones, so the guess that completes the word can never
    /// also fail the game.
    ///
    /// # Errors
    /// Returns [`SessionError::Closed`] if the game is already solved or
    /// failed. The session is left untouched.
    pub fn guess(&mut self, raw: char) -> Result<GuessOutcome, SessionError> {
        if self.status.is_finished() {
            return Err(SessionError::Closed(self.id));
        }

        let ch = normalize(raw);
        if let Some(&correct) = self.guessed.get(&ch) {
            return Ok(self.outcome(correct));
        }

        let mut correct = false;
        for (pos, c) in self.chars.iter().enumerate() {
            if *c == ch {
                self.revealed[pos] = true;
                correct = true;
            }
        }
        self.guessed.insert(ch, correct);

        let next = if correct {
            if self.revealed.iter().all(|r| *r) {
                GameStatus::Solved
            } else {
                GameStatus::InProgress
            }
        } else {
            self.mistake_count += 1;
            if self.mistake_count >= self.max_mistakes {
                GameStatus::Failed
            } else {
                GameStatus::InProgress
            }
        };
        debug_assert!(next == self.status || self.status.can_transition_to(next));
        self.status = next;

        Ok(self.outcome(correct))
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// The word with unrevealed letters replaced by `'_'`.
    pub fn masked_word(&self) -> String {
        self.chars
            .iter()
            .zip(&self.revealed)
            .map(|(c, shown)| if *shown { *c } else { MASK_PLACEHOLDER })
            .collect()
    }

    pub fn mistake_count(&self) -> u32 {
        self.mistake_count
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    /// Wrong guesses left before the game fails.
    pub fn remaining_mistakes(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistake_count)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == GameStatus::Solved
    }

    /// Returns `true` once the game is solved or failed.
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Every character guessed so far, alphabetically.
    pub fn guessed(&self) -> Vec<char> {
        self.guessed.keys().copied().collect()
    }

    /// Returns `true` if `c` (case-folded) was already guessed.
    pub fn has_guessed(&self, c: char) -> bool {
        self.guessed.contains_key(&normalize(c))
    }

    /// The secret word, but only once the game is over.
    pub fn reveal(&self) -> Option<&str> {
        self.is_finished().then_some(self.word.as_str())
    }

    /// The public view of this game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            masked_word: self.masked_word(),
            mistake_count: self.mistake_count,
            max_mistakes: self.max_mistakes,
            status: self.status,
            solved: self.is_solved(),
            guessed: self.guessed(),
        }
    }

    fn outcome(&self, correct: bool) -> GuessOutcome {
        GuessOutcome {
            correct,
            game: self.snapshot(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("masked_word", &self.masked_word())
            .field("mistake_count", &self.mistake_count)
            .field("max_mistakes", &self.max_mistakes)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
