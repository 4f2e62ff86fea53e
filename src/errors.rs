//! Consent-protocol error taxonomy.
//!
//! The taxonomy is deliberately closed and small.  Which kind can occur
//! depends on the direction of travel:
//!
//! - `UnknownToken` is decode-time only and is never returned to callers:
//!   the decoder logs it and skips the token, because inbound headers come
//!   from user agents that may speak a newer vocabulary than we do.
//! - `UnknownCategory` / `UnknownPurpose` are caller-facing: an ask or a
//!   query names its tokens deliberately, so a bad one is a caller bug (or a
//!   vocabulary-version mismatch between sender and receiver) and silent
//!   dropping would mislead the user.  The two kinds are separate so the
//!   message can say which side of the pair was wrong.
//! - `MalformedState` marks shape corruption in a consent snapshot, as
//!   opposed to a typo'd token.  The in-memory matrix is fixed-size and
//!   cannot lose its shape; this kind surfaces when deserializing an
//!   interchange snapshot whose cells are not booleans.

use thiserror::Error;

/// Error raised by the consent codec.
///
/// Decode-time recovery never surfaces these; construction and query
/// surfaces return them synchronously to the caller that supplied the
/// offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsentError {
    /// A header token matched neither the category nor the purpose
    /// vocabulary.  Logged and skipped during decoding.
    #[error("unknown token '{0}' (neither a category nor a purpose)")]
    UnknownToken(String),

    /// A token supplied where a category was expected is not in the
    /// category vocabulary.
    #[error("unknown category '{0}'. Is the correct vocabulary version installed?")]
    UnknownCategory(String),

    /// A token supplied where a purpose was expected is not in the
    /// purpose vocabulary.
    #[error("unknown purpose '{0}'. Is the correct vocabulary version installed?")]
    UnknownPurpose(String),

    /// A consent or ask snapshot does not have the expected matrix shape.
    #[error("malformed consent state: {0}")]
    MalformedState(String),
}

impl ConsentError {
    /// True for the kinds that indicate a vocabulary-version mismatch
    /// rather than data corruption.
    pub fn is_vocabulary_mismatch(&self) -> bool {
        matches!(
            self,
            ConsentError::UnknownToken(_)
                | ConsentError::UnknownCategory(_)
                | ConsentError::UnknownPurpose(_)
        )
    }
}
