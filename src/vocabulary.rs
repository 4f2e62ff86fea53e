//! Consent-protocol vocabulary — token catalogues, header names, and wire
//! literals.
//!
//! The vocabulary is fixed at compile time.  Categories and purposes are
//! closed enums rather than runtime string sets, so a vocabulary mismatch in
//! typed code is a compile error, and only the two string boundaries (the
//! decoder and the token-pair surfaces) can ever see an unknown token.
//!
//! Tokens are case-sensitive, exactly three ASCII characters, and globally
//! unique across the union of both catalogues — a token is never both a
//! category and a purpose.  Wire behavior depends only on token identity,
//! not on the glosses documented here.

use serde::{Deserialize, Serialize};

use crate::errors::ConsentError;

/// Name of the inbound header carrying the user's consent preference.
///
/// Collaborators read this header before invoking [`crate::decode`], and
/// must add it to the response `Vary` signal whenever an outbound value is
/// produced, so caches never serve one user's acknowledgement to another.
pub const CONSENT_HEADER: &str = "Consent-Preference";

/// Name of the outbound header carrying the acknowledgement and any asks.
pub const ACK_HEADER: &str = "Consent-Ack";

/// Reserved inbound literal meaning "no consent to anything".
///
/// Matched against the whole header value, not against individual groups;
/// distinct from the header being absent.
pub const NOTHING_LITERAL: &str = "{NOT}";

/// Acknowledgement literal opening every outbound value.
pub const ACK_LITERAL: &str = "ACK";

/// Literal opening the ask block of an acknowledgement, `{ASK ...}`.
pub const ASK_LITERAL: &str = "ASK";

/// Literal opening a tracking group, e.g. `{global-tracking adv1,adv2}`.
pub const TRACKING_LITERAL: &str = "global-tracking";

/// Pseudo-category accepted by the token-pair surfaces.  A pair
/// `("tracking", target)` addresses the tracking-target list instead of the
/// category×purpose matrix.
pub const TRACKING_PSEUDO_CATEGORY: &str = "tracking";

/// Soft limit on ask reason text, in characters.  Violations are logged and
/// encoded in full, never truncated or rejected.
pub const REASON_SOFT_LIMIT: usize = 280;

// ── Categories ───────────────────────────────────────────────

/// A data category the user can grant processing consent for.
///
/// Declaration order is vocabulary order; wire rendering sorts by token
/// instead (see the grouping compactor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Cookies and similar client-side storage.
    Coo,
    /// Equipment: device and hardware information.
    Equ,
    /// Software environment: browser, OS, installed capabilities.
    Sfw,
    /// Geolocation data.
    Geo,
}

impl Category {
    /// Number of categories in the vocabulary.
    pub const COUNT: usize = 4;

    /// All categories in vocabulary order.
    pub const ALL: [Category; Category::COUNT] =
        [Category::Coo, Category::Equ, Category::Sfw, Category::Geo];

    /// The category's wire token.
    pub const fn token(self) -> &'static str {
        match self {
            Category::Coo => "coo",
            Category::Equ => "equ",
            Category::Sfw => "sfw",
            Category::Geo => "geo",
        }
    }

    /// Look a wire token up in the category catalogue.
    pub fn from_token(token: &str) -> Option<Category> {
        match token {
            "coo" => Some(Category::Coo),
            "equ" => Some(Category::Equ),
            "sfw" => Some(Category::Sfw),
            "geo" => Some(Category::Geo),
            _ => None,
        }
    }
}

// ── Purposes ─────────────────────────────────────────────────

/// A processing purpose the user can grant consent for, per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// Core functionality of the service.
    Fcn,
    /// Personalization of content.
    Per,
    /// Site administration and security.
    Adm,
    /// Analytics and audience measurement.
    Ana,
    /// Communication and outreach.
    Com,
    /// Transfer to third parties.
    Trd,
    /// Location-based services.
    Loc,
}

impl Purpose {
    /// Number of purposes in the vocabulary.
    pub const COUNT: usize = 7;

    /// All purposes in vocabulary order.
    pub const ALL: [Purpose; Purpose::COUNT] = [
        Purpose::Fcn,
        Purpose::Per,
        Purpose::Adm,
        Purpose::Ana,
        Purpose::Com,
        Purpose::Trd,
        Purpose::Loc,
    ];

    /// The purpose's wire token.
    pub const fn token(self) -> &'static str {
        match self {
            Purpose::Fcn => "fcn",
            Purpose::Per => "per",
            Purpose::Adm => "adm",
            Purpose::Ana => "ana",
            Purpose::Com => "com",
            Purpose::Trd => "trd",
            Purpose::Loc => "loc",
        }
    }

    /// Look a wire token up in the purpose catalogue.
    pub fn from_token(token: &str) -> Option<Purpose> {
        match token {
            "fcn" => Some(Purpose::Fcn),
            "per" => Some(Purpose::Per),
            "adm" => Some(Purpose::Adm),
            "ana" => Some(Purpose::Ana),
            "com" => Some(Purpose::Com),
            "trd" => Some(Purpose::Trd),
            "loc" => Some(Purpose::Loc),
            _ => None,
        }
    }
}

// ── Token classification ─────────────────────────────────────

/// A wire token resolved against the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Category(Category),
    Purpose(Purpose),
}

/// Classify a setting-group token against both catalogues.
///
/// Token uniqueness across the catalogues makes the result unambiguous.
/// The decoder logs the error case and skips the token; it never propagates.
pub fn classify_token(token: &str) -> Result<TokenClass, ConsentError> {
    if let Some(category) = Category::from_token(token) {
        return Ok(TokenClass::Category(category));
    }
    if let Some(purpose) = Purpose::from_token(token) {
        return Ok(TokenClass::Purpose(purpose));
    }
    Err(ConsentError::UnknownToken(token.to_string()))
}
