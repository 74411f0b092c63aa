//! `GameService` builder and request dispatch.
//!
//! This is the entry point for embedding the engine behind any transport.
//! It ties the layers together: bytes → protocol → directory → session.

use std::sync::Arc;
use std::time::Duration;

use hangman_directory::{Directory, DirectoryConfig, WordSource, spawn_sweeper};
use hangman_protocol::{
    Codec, GameId, GameSnapshot, GuessOutcome, JsonCodec, Language, Request, Response, guess_char,
};
use tokio::task::JoinHandle;

use crate::HangmanError;

/// Builder for configuring a [`GameService`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use hangman::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), HangmanError> {
/// let service = GameService::builder()
///     .sweep_interval(Duration::from_secs(30))
///     .build(WordList::embedded());
///
/// let game = service.generate(Language::English).await?;
/// assert_eq!(game.mistake_count, 0);
/// # Ok(())
/// # }
/// ```
pub struct GameServiceBuilder<C: Codec = JsonCodec> {
    directory_config: DirectoryConfig,
    sweep_interval: Option<Duration>,
    codec: C,
}

impl GameServiceBuilder {
    /// Creates a new builder with default settings and JSON encoding.
    pub fn new() -> Self {
        Self {
            directory_config: DirectoryConfig::default(),
            sweep_interval: None,
            codec: JsonCodec,
        }
    }
}

impl Default for GameServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> GameServiceBuilder<C> {
    /// Sets the directory configuration (TTLs, capacity, mistake limit).
    pub fn directory_config(mut self, config: DirectoryConfig) -> Self {
        self.directory_config = config;
        self
    }

    /// Runs [`Directory::expire_stale`] in the background every `period`.
    ///
    /// Without this, stale games are only removed when the caller asks.
    pub fn sweep_interval(mut self, period: Duration) -> Self {
        self.sweep_interval = Some(period);
        self
    }

    /// Replaces the codec used by [`GameService::handle_bytes`].
    pub fn codec<C2: Codec>(self, codec: C2) -> GameServiceBuilder<C2> {
        GameServiceBuilder {
            directory_config: self.directory_config,
            sweep_interval: self.sweep_interval,
            codec,
        }
    }

    /// Builds the service around `words`.
    ///
    /// The sweeper needs a Tokio runtime. Outside one, a configured
    /// sweep interval is ignored with a warning.
    pub fn build<W: WordSource>(self, words: W) -> GameService<W, C> {
        let directory = Arc::new(Directory::new(self.directory_config, words));

        let sweeper = match (self.sweep_interval, tokio::runtime::Handle::try_current()) {
            (Some(period), Ok(_)) => Some(spawn_sweeper(&directory, period)),
            (Some(_), Err(_)) => {
                tracing::warn!("no Tokio runtime, background sweeping disabled");
                None
            }
            (None, _) => None,
        };

        GameService {
            directory,
            codec: self.codec,
            sweeper,
        }
    }
}

/// Answers Hangman requests against a shared [`Directory`].
///
/// Errors never escape [`handle`](Self::handle): each becomes a
/// `Response::Error` carrying [`HangmanError::code`]. The typed methods
/// return `Result` for callers that don't need the wire types.
///
/// Cheap to share: wrap it in an `Arc` and call it from any task.
pub struct GameService<W: WordSource, C: Codec = JsonCodec> {
    directory: Arc<Directory<W>>,
    codec: C,
    sweeper: Option<JoinHandle<()>>,
}

impl GameService<hangman_directory::WordList> {
    /// Creates a new builder.
    pub fn builder() -> GameServiceBuilder {
        GameServiceBuilder::new()
    }
}

impl<W: WordSource, C: Codec> GameService<W, C> {
    /// Handles one decoded request.
    pub async fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Generate { lang } => self.generate(lang).await.map(Response::from),
            Request::Create { word } => self.create_with_word(&word).await.map(Response::from),
            Request::Get { id } => self.get(id).await.map(Response::from),
            Request::Guess { id, character } => match guess_char(&character) {
                Ok(c) => self.guess(id, c).await.map(Response::from),
                Err(e) => Err(e.into()),
            },
        };

        result.unwrap_or_else(|e| error_response(&e))
    }

    /// Decodes a request, handles it and encodes the response.
    ///
    /// Undecodable input is answered with an encoded 400 error rather
    /// than an `Err`.
    ///
    /// # Errors
    /// Returns [`HangmanError::Protocol`] only if the response itself
    /// can't be encoded.
    pub async fn handle_bytes(&self, data: &[u8]) -> Result<Vec<u8>, HangmanError> {
        let response = match self.codec.decode::<Request>(data) {
            Ok(request) => self.handle(request).await,
            Err(e) => error_response(&e.into()),
        };
        Ok(self.codec.encode(&response)?)
    }

    /// Starts a game with a random word.
    ///
    /// # Errors
    /// Fails if the word source has nothing for `language`.
    pub async fn generate(&self, language: Language) -> Result<GameSnapshot, HangmanError> {
        Ok(self.directory.generate(language).await?)
    }

    /// Starts a game with a caller-chosen word.
    ///
    /// # Errors
    /// Fails if the word is empty or has no letter.
    pub async fn create_with_word(&self, word: &str) -> Result<GameSnapshot, HangmanError> {
        Ok(self.directory.create_with_word(word).await?)
    }

    /// # Errors
    /// Fails if the game doesn't exist (any more).
    pub async fn get(&self, id: GameId) -> Result<GameSnapshot, HangmanError> {
        Ok(self.directory.get(id).await?)
    }

    /// Guesses one character.
    ///
    /// # Errors
    /// Fails if the game doesn't exist or is over.
    pub async fn guess(&self, id: GameId, character: char) -> Result<GuessOutcome, HangmanError> {
        Ok(self.directory.submit_guess(id, character).await?)
    }

    /// The secret word once the game is over, `None` before.
    ///
    /// # Errors
    /// Fails if the game doesn't exist.
    pub async fn reveal(&self, id: GameId) -> Result<Option<String>, HangmanError> {
        Ok(self.directory.reveal(id).await?)
    }

    pub fn directory(&self) -> &Arc<Directory<W>> {
        &self.directory
    }
}

impl<W: WordSource, C: Codec> Drop for GameService<W, C> {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
    }
}

fn error_response(err: &HangmanError) -> Response {
    let code = err.code();
    tracing::debug!(code, error = %err, "request rejected");
    Response::Error {
        code,
        message: err.to_string(),
    }
}
