//! Inbound consent-header decoder.
//!
//! The inbound value is a concatenation of brace groups:
//!
//! ```text
//! {coo equ fcn ana}{geo loc}{global-tracking ads.example,cdn.example}
//! ```
//!
//! A group containing the literal `global-tracking` lists consented
//! tracking targets (comma-separated, free-form).  Every other group is a
//! *setting* group: space-separated category and purpose tokens, granting
//! the cross product of its categories and purposes.  Groups accumulate;
//! their order never matters, except that a repeated tracking group
//! replaces the earlier one.  The reserved value `{NOT}` (the whole header,
//! exactly) grants nothing.
//!
//! Decoding is deliberately lenient: characters outside braces and empty
//! `{}` groups are ignored, and unknown tokens are skipped with a
//! diagnostic so a client speaking a newer vocabulary still gets its known
//! tokens honored.  The `Result` return reserves failure for grammar
//! evolution; the current grammar has no unrecoverable input.

use tracing::{debug, warn};

use crate::errors::ConsentError;
use crate::state::{ConsentState, SettingMatrix};
use crate::vocabulary::{classify_token, TokenClass, NOTHING_LITERAL, TRACKING_LITERAL};

/// Decode the value of an inbound consent header.
///
/// The caller invokes this only when the header is present; an absent
/// header is [`ConsentState::no_preference`], which this function never
/// returns.  Any present value, however degenerate, communicates a
/// preference.
pub fn decode(raw: &str) -> Result<ConsentState, ConsentError> {
    if raw == NOTHING_LITERAL {
        return Ok(ConsentState::nothing_allowed());
    }

    let groups = extract_groups(raw);
    if groups.is_empty() {
        warn!(raw, "consent header has no groups; reading it as consent to nothing");
        return Ok(ConsentState::nothing_allowed());
    }

    let mut state = ConsentState::nothing_allowed();
    let mut saw_tracking = false;
    for group in groups {
        if group.contains(TRACKING_LITERAL) {
            if saw_tracking {
                debug!(group, "repeated tracking group replaces the earlier one");
            }
            saw_tracking = true;
            state.tracking = parse_tracking_group(group);
        } else {
            apply_setting_group(&mut state.matrix, group);
        }
    }
    Ok(state)
}

/// Extract the non-empty interiors of brace groups, in order of appearance.
///
/// A group spans from `{` to the next `}`.  Braces do not nest on the
/// inbound side, so a stray `{` inside a group is ordinary content.  An
/// unterminated trailing group and anything outside braces are dropped.
fn extract_groups(raw: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let bytes = raw.as_bytes();
    let mut at = 0;
    while at < bytes.len() {
        if bytes[at] != b'{' {
            at += 1;
            continue;
        }
        let start = at + 1;
        match bytes[start..].iter().position(|&b| b == b'}') {
            Some(len) => {
                // Both delimiters are ASCII, so the slice is char-aligned.
                if len > 0 {
                    groups.push(&raw[start..start + len]);
                }
                at = start + len + 1;
            }
            None => break,
        }
    }
    groups
}

/// Split a tracking group into its targets.
///
/// Targets are whatever follows the `global-tracking` literal (and its one
/// separating space), comma-separated.  They are opaque to the vocabulary.
/// A bare `{global-tracking}` yields the empty list.
fn parse_tracking_group(group: &str) -> Vec<String> {
    let after = match group.find(TRACKING_LITERAL) {
        Some(at) => &group[at + TRACKING_LITERAL.len()..],
        None => return Vec::new(),
    };
    let targets = after.strip_prefix(' ').unwrap_or(after);
    targets
        .split(',')
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply one setting group to the matrix.
///
/// Sets true every (category, purpose) cell in the cross product of the
/// group's known tokens.  Unknown tokens are skipped, not fatal.
fn apply_setting_group(matrix: &mut SettingMatrix, group: &str) {
    let mut categories = Vec::new();
    let mut purposes = Vec::new();
    for token in group.split(' ').filter(|token| !token.is_empty()) {
        match classify_token(token) {
            Ok(TokenClass::Category(category)) => categories.push(category),
            Ok(TokenClass::Purpose(purpose)) => purposes.push(purpose),
            Err(err) => warn!(%err, group, "skipping unknown token in setting group"),
        }
    }
    for &category in &categories {
        for &purpose in &purposes {
            matrix.set(category, purpose, true);
        }
    }
}
