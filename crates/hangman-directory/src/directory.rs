//! The directory: every live game, keyed by id.
//!
//! Responsibilities:
//! - Creating games (random word or custom word) under fresh ids
//! - Finding a game for a snapshot or a guess
//! - Serializing guesses per game so the mistake count can't double-count
//!   a retried request
//! - Evicting idle and finished games, and making room when full

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use hangman_protocol::{GameId, GameSnapshot, GuessOutcome, Language};
use hangman_session::Session;
use rand::Rng;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{DirectoryConfig, DirectoryError, WordSource};

/// One registered game plus the bookkeeping eviction needs.
///
/// `last_activity` and `finished` are atomics so they can be read while
/// sweeping without touching the session lock.
struct Entry {
    session: RwLock<Session>,

    /// Milliseconds since the directory's epoch.
    last_activity: AtomicU64,

    finished: AtomicBool,
}

impl Entry {
    fn new(session: Session, now: u64) -> Self {
        Self {
            session: RwLock::new(session),
            last_activity: AtomicU64::new(now),
            finished: AtomicBool::new(false),
        }
    }

    /// Records activity. A finished game keeps the time it finished, so
    /// late requests can't hold it past `finished_ttl`.
    fn touch(&self, now: u64) {
        if !self.is_finished() {
            self.last_activity.fetch_max(now, Ordering::Relaxed);
        }
    }

    fn last_activity(&self) -> u64 {
        self.last_activity.load(Ordering::Relaxed)
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Registry of live games.
///
/// ## Lifecycle of a game
///
/// ```text
/// generate() / create_with_word() ──→ [registered]
///                                        │  get(), submit_guess()
///                                        ▼
///                              [solved or failed]  ← guesses now fail
///                                        │
///            expire_stale() / evict() / capacity  ──→ [gone: NotFound]
/// ```
///
/// The directory is `Send + Sync`; share it as `Arc<Directory<W>>`.
pub struct Directory<W: WordSource> {
    sessions: RwLock<HashMap<GameId, Arc<Entry>>>,
    config: DirectoryConfig,
    words: W,

    /// Reference point for `Entry::last_activity`. Tokio's `Instant`, so
    /// tests can drive eviction with a paused clock.
    epoch: Instant,
}

impl<W: WordSource> Directory<W> {
    /// Creates an empty directory. The config is
    /// [validated](DirectoryConfig::validated) first.
    pub fn new(config: DirectoryConfig, words: W) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config: config.validated(),
            words,
            epoch: Instant::now(),
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Starts a game with a random word in `language`.
    ///
    /// # Errors
    /// - [`DirectoryError::NoWords`] / [`DirectoryError::Io`] — the word
    ///   source failed
    /// - [`DirectoryError::Session`] — the source returned an unplayable
    ///   word
    pub async fn generate(&self, language: Language) -> Result<GameSnapshot, DirectoryError> {
        let word = self.words.pick(language).await?;
        let snapshot = self.register(&word).await?;
        tracing::info!(game_id = %snapshot.id, %language, "random game created");
        Ok(snapshot)
    }

    /// Starts a game with a caller-supplied word.
    ///
    /// # Errors
    /// Returns [`DirectoryError::Session`] wrapping
    /// [`SessionError::InvalidWord`](hangman_session::SessionError::InvalidWord)
    /// if the word is empty or has no letter.
    pub async fn create_with_word(&self, word: &str) -> Result<GameSnapshot, DirectoryError> {
        let snapshot = self.register(word).await?;
        tracing::info!(game_id = %snapshot.id, "custom game created");
        Ok(snapshot)
    }

    /// Returns the current snapshot of a game.
    ///
    /// Only takes read locks, so it never waits behind other reads.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if the id is unknown or evicted.
    pub async fn get(&self, id: GameId) -> Result<GameSnapshot, DirectoryError> {
        let entry = self.entry(id).await?;
        entry.touch(self.now());
        let session = entry.session.read().await;
        Ok(session.snapshot())
    }

    /// Evaluates a guess against a game.
    ///
    /// The game's write lock is held for the whole evaluation, so two
    /// concurrent guesses on one id run one after the other and a retried
    /// request is seen as a repeat.
    ///
    /// # Errors
    /// - [`DirectoryError::NotFound`] — unknown or evicted id
    /// - [`DirectoryError::Session`] — the game is already over
    pub async fn submit_guess(
        &self,
        id: GameId,
        character: char,
    ) -> Result<GuessOutcome, DirectoryError> {
        let entry = self.entry(id).await?;
        let mut session = entry.session.write().await;

        let outcome = match session.guess(character) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(game_id = %id, %character, error = %e, "guess rejected");
                return Err(e.into());
            }
        };
        entry.touch(self.now());

        tracing::debug!(
            game_id = %id,
            %character,
            correct = outcome.correct,
            mistakes = outcome.game.mistake_count,
            "guess evaluated"
        );

        if outcome.game.status.is_finished() {
            entry.finished.store(true, Ordering::Relaxed);
            tracing::info!(
                game_id = %id,
                status = %outcome.game.status,
                mistakes = outcome.game.mistake_count,
                "game over"
            );
        }

        Ok(outcome)
    }

    /// The secret word of a finished game, `None` while it is running.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if the id is unknown or evicted.
    pub async fn reveal(&self, id: GameId) -> Result<Option<String>, DirectoryError> {
        let entry = self.entry(id).await?;
        let session = entry.session.read().await;
        Ok(session.reveal().map(str::to_owned))
    }

    /// Removes a game.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if there was nothing to remove.
    pub async fn evict(&self, id: GameId) -> Result<(), DirectoryError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or(DirectoryError::NotFound(id))?;
        tracing::info!(game_id = %id, "game evicted");
        Ok(())
    }

    /// Removes running games idle longer than `idle_ttl` and finished
    /// games idle longer than `finished_ttl`.
    ///
    /// Returns the ids that were removed. Call this periodically, or let
    /// [`spawn_sweeper`](crate::spawn_sweeper) do it.
    pub async fn expire_stale(&self) -> Vec<GameId> {
        let now = self.now();
        let idle_ttl = self.config.idle_ttl;
        let finished_ttl = self.config.finished_ttl;
        let mut expired = Vec::new();

        self.sessions.write().await.retain(|id, entry| {
            let idle = Duration::from_millis(now.saturating_sub(entry.last_activity()));
            let ttl = if entry.is_finished() { finished_ttl } else { idle_ttl };
            if idle > ttl {
                expired.push(*id);
                false
            } else {
                true
            }
        });

        for id in &expired {
            tracing::info!(game_id = %id, "game expired");
        }
        expired
    }

    /// Number of registered games (any status).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Ids of every registered game, in no particular order.
    pub async fn ids(&self) -> Vec<GameId> {
        self.sessions.read().await.keys().copied().collect()
    }

    // -- internals --------------------------------------------------------

    /// Creates the session and inserts it, evicting first if full.
    ///
    /// The session is built before anything is evicted, so an invalid
    /// word never costs another game its slot.
    async fn register(&self, word: &str) -> Result<GameSnapshot, DirectoryError> {
        let mut sessions = self.sessions.write().await;

        let id = loop {
            let candidate = generate_id();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        let session = Session::with_config(id, word, &self.config.session)?;
        let snapshot = session.snapshot();

        let max = self.config.max_sessions;
        if max > 0 && sessions.len() >= max {
            evict_least_recent(&mut sessions);
        }

        sessions.insert(id, Arc::new(Entry::new(session, self.now())));
        Ok(snapshot)
    }

    /// Clones the entry out of the map so the map lock is released before
    /// the session lock is taken.
    async fn entry(&self, id: GameId) -> Result<Arc<Entry>, DirectoryError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }

    fn now(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Drops the least recently active game, finished games first.
///
/// A linear scan: it only runs when the directory is full, and the map
/// lock is already held for the insert.
fn evict_least_recent(sessions: &mut HashMap<GameId, Arc<Entry>>) {
    let victim = sessions
        .iter()
        .min_by_key(|(_, entry)| (!entry.is_finished(), entry.last_activity()))
        .map(|(id, _)| *id);

    if let Some(id) = victim {
        sessions.remove(&id);
        tracing::info!(game_id = %id, "game evicted to make room");
    }
}

/// 128 random bits. Collisions are checked by the caller anyway.
fn generate_id() -> GameId {
    GameId(rand::rng().random())
}

// =========================================================================
// Tests
// =========================================================================
