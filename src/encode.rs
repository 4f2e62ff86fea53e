//! Outbound acknowledgement encoder.
//!
//! Every response that consumed a communicated preference owes the client
//! an acknowledgement, optionally carrying asks for further consent:
//!
//! ```text
//! ACK
//! ACK {ASK <ask><ask>...}
//! ask = {<setting groups><tracking group?>} ID{<id>} TXT{<reason>}
//! ```
//!
//! Asks are concatenated with no separator; the decoder on the client side
//! refragments on braces.  Rendering is deterministic because the setting
//! groups come from the [`crate::groups`] compactor.
//!
//! `id` and `reason` are inserted verbatim.  The protocol defines no
//! escaping, so a brace character in either corrupts the framing; keep
//! both free of `{` and `}`.

use tracing::warn;

use crate::groups::{compact, render_groups};
use crate::state::{any_true, AskRequest};
use crate::vocabulary::{ACK_LITERAL, ASK_LITERAL, TRACKING_LITERAL};

/// Encode the outbound acknowledgement header value, if one is owed.
///
/// `ack_pending` says whether the request communicated a preference; when
/// it is false no header is emitted at all and any queued asks are
/// discarded with a diagnostic.  With no asks the value is the bare
/// acknowledgement.  Encoding itself cannot fail: ask contents were
/// validated when the asks were built.
pub fn encode(ack_pending: bool, asks: &[AskRequest]) -> Option<String> {
    if !ack_pending {
        if !asks.is_empty() {
            warn!(
                discarded = asks.len(),
                "asks queued on a response that owes no acknowledgement; discarding them"
            );
        }
        return None;
    }
    if asks.is_empty() {
        return Some(ACK_LITERAL.to_string());
    }

    let mut value = String::from(ACK_LITERAL);
    value.push_str(" {");
    value.push_str(ASK_LITERAL);
    value.push(' ');
    for ask in asks {
        render_ask(&mut value, ask);
    }
    value.push('}');
    Some(value)
}

/// Append one rendered ask.
///
/// The leading brace pair carries the consent being requested: compacted
/// setting groups when the ask matrix has any true cell, then the tracking
/// sub-group when the ask names tracking targets.  An ask requesting
/// nothing still renders its (empty) braces so the ID and TXT sections
/// stay attached to something parseable.
fn render_ask(out: &mut String, ask: &AskRequest) {
    out.push('{');
    if any_true(&ask.matrix) {
        out.push_str(&render_groups(&compact(&ask.matrix)));
    }
    if !ask.tracking.is_empty() {
        out.push('{');
        out.push_str(TRACKING_LITERAL);
        out.push(' ');
        out.push_str(&ask.tracking.join(","));
        out.push('}');
    }
    out.push_str("} ID{");
    out.push_str(&ask.id);
    out.push_str("} TXT{");
    out.push_str(&ask.reason);
    out.push('}');
}
