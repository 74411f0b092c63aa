//! Directory configuration.

use std::time::Duration;

use hangman_session::SessionConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Directory`](crate::Directory).
///
/// Every field has a sensible default; override only what you need:
///
/// ```rust
/// use std::time::Duration;
/// use hangman_directory::DirectoryConfig;
///
/// let config = DirectoryConfig {
///     idle_ttl: Duration::from_secs(600),
///     ..DirectoryConfig::default()
/// };
/// assert_eq!(config.max_sessions, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Settings applied to every game this directory creates.
    pub session: SessionConfig,

    /// A running game untouched for this long is evicted.
    ///
    /// Default: 30 minutes.
    pub idle_ttl: Duration,

    /// A solved or failed game untouched for this long is evicted. It
    /// stays around briefly so late guesses get "game over" instead of
    /// "not found".
    ///
    /// Default: 60 seconds. Never longer than `idle_ttl`.
    pub finished_ttl: Duration,

    /// Upper bound on live games. When full, registering a new game
    /// first evicts the least recently active one (finished games go
    /// first). 0 means unbounded.
    ///
    /// Default: 10 000.
    pub max_sessions: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            idle_ttl: Duration::from_secs(30 * 60),
            finished_ttl: Duration::from_secs(60),
            max_sessions: 10_000,
        }
    }
}

impl DirectoryConfig {
    /// Clamps inconsistent values. Called by
    /// [`Directory::new`](crate::Directory::new).
    pub fn validated(mut self) -> Self {
        self.session = self.session.validated();
        if self.finished_ttl > self.idle_ttl {
            tracing::warn!(
                finished_ttl = ?self.finished_ttl,
                idle_ttl = ?self.idle_ttl,
                "finished_ttl exceeds idle_ttl, clamping"
            );
            self.finished_ttl = self.idle_ttl;
        }
        self
    }
}
