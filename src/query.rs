//! Consent queries against a decoded state.
//!
//! Gate code asks one question: "did this request consent to all of
//! these?"  Queries are conjunctive and deny by default: a request that
//! never communicated a preference answers no to everything, including
//! the empty query.
//!
//! Two surfaces cover the two kinds of caller.  Typed call sites build
//! [`ConsentPair`] values and use [`consent_given`], which cannot fail.
//! Call sites fed from configuration use [`consent_given_pairs`] with raw
//! token pairs, where a bad token is a hard error at the call site that
//! wrote it, never a silent "no".

use tracing::debug;

use crate::errors::ConsentError;
use crate::state::ConsentState;
use crate::vocabulary::{Category, Purpose, TRACKING_PSEUDO_CATEGORY};

/// One queryable consent item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentPair {
    /// One category/purpose cell of the matrix.
    Setting(Category, Purpose),
    /// Consent to one named tracking target.
    Tracking(String),
}

impl ConsentPair {
    /// Parse a token pair.
    ///
    /// The pseudo-category `tracking` routes the second token to a
    /// tracking target, which is free-form; any other pair must name a
    /// known category and purpose.
    pub fn parse(category: &str, purpose: &str) -> Result<ConsentPair, ConsentError> {
        if category == TRACKING_PSEUDO_CATEGORY {
            return Ok(ConsentPair::Tracking(purpose.to_string()));
        }
        let known_category = Category::from_token(category)
            .ok_or_else(|| ConsentError::UnknownCategory(category.to_string()))?;
        let known_purpose = Purpose::from_token(purpose)
            .ok_or_else(|| ConsentError::UnknownPurpose(purpose.to_string()))?;
        Ok(ConsentPair::Setting(known_category, known_purpose))
    }
}

/// Whether the state grants every queried pair.
///
/// True only when a preference was communicated and every pair is
/// granted.  The empty query is vacuously true under a communicated
/// preference.
pub fn consent_given(state: &ConsentState, pairs: &[ConsentPair]) -> bool {
    if !state.preference_communicated {
        debug!("consent denied: no preference was communicated");
        return false;
    }
    pairs.iter().all(|pair| granted(state, pair))
}

/// Token-level twin of [`consent_given`].
///
/// The absent-preference denial comes first, before any token is parsed,
/// and pairs are then parsed and evaluated left to right with
/// short-circuiting.  A bad token therefore only errors when the query
/// actually reaches it: pairs after the first denial are never inspected.
pub fn consent_given_pairs(
    state: &ConsentState,
    pairs: &[(&str, &str)],
) -> Result<bool, ConsentError> {
    if !state.preference_communicated {
        debug!("consent denied: no preference was communicated");
        return Ok(false);
    }
    for &(category, purpose) in pairs {
        let pair = ConsentPair::parse(category, purpose)?;
        if !granted(state, &pair) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn granted(state: &ConsentState, pair: &ConsentPair) -> bool {
    match pair {
        ConsentPair::Setting(category, purpose) => state.matrix.get(*category, *purpose),
        ConsentPair::Tracking(target) => state.tracking.iter().any(|have| have == target),
    }
}
