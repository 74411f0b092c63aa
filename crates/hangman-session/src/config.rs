//! Per-game settings.

use serde::{Deserialize, Serialize};

/// The mistake limit the web client was built around (its gallows has
/// eleven strokes).
pub const DEFAULT_MAX_MISTAKES: u32 = 11;

/// Configuration shared by every session a directory creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of wrong guesses that ends a game as failed.
    ///
    /// Default: 11. Must be at least 1.
    pub max_mistakes: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_mistakes: DEFAULT_MAX_MISTAKES,
        }
    }
}

impl SessionConfig {
    /// A config with the given mistake limit.
    pub fn with_max_mistakes(max_mistakes: u32) -> Self {
        Self { max_mistakes }.validated()
    }

    /// Fixes out-of-range values so the config is safe to use.
    ///
    /// A limit of 0 would make every game unplayable, so it is raised to 1.
    pub fn validated(mut self) -> Self {
        if self.max_mistakes == 0 {
            tracing::warn!("max_mistakes is 0, raising to 1");
            self.max_mistakes = 1;
        }
        self
    }
}
