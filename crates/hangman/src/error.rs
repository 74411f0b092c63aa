//! Unified error type for the Hangman engine.

use hangman_directory::DirectoryError;
use hangman_protocol::ProtocolError;
use hangman_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `hangman` facade you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant generates the `From` impls, so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    /// A protocol-level error (encode, decode, malformed field).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A game refused a word or a guess.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Lookup, word source or eviction failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl HangmanError {
    /// HTTP-style status code reported in `Response::Error`.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 400 | request bytes could not be decoded |
    /// | 404 | no such game |
    /// | 409 | the game is already over |
    /// | 422 | unusable word, or a malformed field |
    /// | 500 | word source or encoding failure |
    pub fn code(&self) -> u16 {
        match self {
            Self::Protocol(e) => protocol_code(e),
            Self::Session(e) => session_code(e),
            Self::Directory(DirectoryError::NotFound(_)) => 404,
            Self::Directory(DirectoryError::Session(e)) => session_code(e),
            Self::Directory(DirectoryError::NoWords(_) | DirectoryError::Io(_)) => 500,
        }
    }
}

fn protocol_code(err: &ProtocolError) -> u16 {
    match err {
        ProtocolError::Decode(_) => 400,
        ProtocolError::InvalidMessage(_) => 422,
        ProtocolError::Encode(_) => 500,
    }
}

fn session_code(err: &SessionError) -> u16 {
    match err {
        SessionError::InvalidWord(_) => 422,
        SessionError::Closed(_) => 409,
    }
}
