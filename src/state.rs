//! Consent-protocol data model.
//!
//! All types here are plain owned values.  The matrix is a dense fixed-size
//! boolean array indexed by the vocabulary enums, so every cell is defined
//! (default false) and an out-of-vocabulary lookup is unrepresentable.  The
//! same matrix shape serves two readings: "has consented to" inside
//! [`ConsentState`], "requesting consent for" inside [`AskRequest`].
//!
//! Predicates over the matrix are free functions, and the model attaches no
//! other behavior; everything is constructed fresh per request/response and
//! owned by exactly one side of the exchange.
//!
//! Serde support renders the matrix in the protocol's token-keyed
//! interchange shape, `{"coo": {"fcn": false, ...}, ...}`, the form consent
//! snapshots take in audit logs.  Deserialization validates tokens and cell
//! types so a corrupted snapshot surfaces the error taxonomy's messages
//! instead of silently reshaping.

use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::errors::ConsentError;
use crate::vocabulary::{Category, Purpose, REASON_SOFT_LIMIT, TRACKING_PSEUDO_CATEGORY};

// ── Setting matrix ───────────────────────────────────────────

/// Dense category×purpose boolean matrix.
///
/// Named after the protocol's "setting" groups, which this matrix expands
/// to and compacts from.  Cells default to false; there is no tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingMatrix {
    cells: [[bool; Purpose::COUNT]; Category::COUNT],
}

impl SettingMatrix {
    /// An all-false matrix.
    pub fn new() -> SettingMatrix {
        SettingMatrix::default()
    }

    /// Read one cell.
    pub fn get(&self, category: Category, purpose: Purpose) -> bool {
        self.cells[category as usize][purpose as usize]
    }

    /// Write one cell.
    pub fn set(&mut self, category: Category, purpose: Purpose, value: bool) {
        self.cells[category as usize][purpose as usize] = value;
    }
}

/// Whether at least one cell of the matrix is true.
pub fn any_true(matrix: &SettingMatrix) -> bool {
    Category::ALL
        .iter()
        .any(|&category| Purpose::ALL.iter().any(|&purpose| matrix.get(category, purpose)))
}

// ── Matrix serde (token-keyed interchange shape) ─────────────
// Derived serde would expose the internal array layout; the interchange
// shape is the token-keyed nested map instead, and deserialization is where
// shape corruption can actually happen in this design, so both directions
// are written by hand.

impl Serialize for SettingMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for category in Category::ALL {
            map.serialize_entry(category.token(), &CategoryRow { matrix: self, category })?;
        }
        map.end()
    }
}

struct CategoryRow<'a> {
    matrix: &'a SettingMatrix,
    category: Category,
}

impl Serialize for CategoryRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Purpose::COUNT))?;
        for purpose in Purpose::ALL {
            map.serialize_entry(purpose.token(), &self.matrix.get(self.category, purpose))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SettingMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<SettingMatrix, D::Error> {
        deserializer.deserialize_map(MatrixVisitor)
    }
}

struct MatrixVisitor;

impl<'de> Visitor<'de> for MatrixVisitor {
    type Value = SettingMatrix;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of category tokens to purpose/boolean maps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SettingMatrix, A::Error> {
        // Missing categories stay all-false, so partial snapshots decode.
        let mut matrix = SettingMatrix::new();
        while let Some(token) = map.next_key::<String>()? {
            let category = Category::from_token(&token)
                .ok_or_else(|| de::Error::custom(ConsentError::UnknownCategory(token.clone())))?;
            map.next_value_seed(RowSeed { matrix: &mut matrix, category })?;
        }
        Ok(matrix)
    }
}

/// Deserializes one category's purpose row directly into the matrix.
struct RowSeed<'a> {
    matrix: &'a mut SettingMatrix,
    category: Category,
}

impl<'de> DeserializeSeed<'de> for RowSeed<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for RowSeed<'_> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of purpose tokens to booleans")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        while let Some(token) = map.next_key::<String>()? {
            let purpose = Purpose::from_token(&token)
                .ok_or_else(|| de::Error::custom(ConsentError::UnknownPurpose(token.clone())))?;
            let value = map.next_value::<bool>().map_err(|_| {
                de::Error::custom(ConsentError::MalformedState(format!(
                    "cell {}/{} must be a boolean",
                    self.category.token(),
                    token,
                )))
            })?;
            self.matrix.set(self.category, purpose, value);
        }
        Ok(())
    }
}

// ── Consent state ────────────────────────────────────────────

/// The decoded consent preference of one request.
///
/// Built exactly once per inbound request — by [`crate::decode`] when the
/// consent header is present, by [`ConsentState::no_preference`] when it is
/// not — then read-only for the lifetime of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentState {
    /// Consent decisions per category and purpose.
    pub matrix: SettingMatrix,
    /// Consented tracking targets, in header order.  Free-form; not
    /// validated against any vocabulary.
    pub tracking: Vec<String>,
    /// True iff an inbound header was present and parsed, even when it
    /// encoded "nothing allowed".  False means no preference was ever sent,
    /// which every query treats as "no".
    pub preference_communicated: bool,
}

impl ConsentState {
    /// State for a request that carried no consent header at all.
    pub fn no_preference() -> ConsentState {
        ConsentState {
            matrix: SettingMatrix::new(),
            tracking: Vec::new(),
            preference_communicated: false,
        }
    }

    /// State for the reserved `{NOT}` value: a preference was communicated
    /// and it grants nothing.
    pub fn nothing_allowed() -> ConsentState {
        ConsentState {
            matrix: SettingMatrix::new(),
            tracking: Vec::new(),
            preference_communicated: true,
        }
    }
}

// ── Ask request ──────────────────────────────────────────────

/// One outbound request for additional consent.
///
/// Application code builds asks during request handling and hands the
/// ordered list to [`crate::encode`] exactly once, at the moment response
/// headers are finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// Category/purpose combinations being requested.
    pub matrix: SettingMatrix,
    /// Tracking targets being requested.
    pub tracking: Vec<String>,
    /// Human-readable justification shown to the user.  Soft-limited to
    /// [`REASON_SOFT_LIMIT`] characters; a longer reason is logged and still
    /// encoded in full.
    pub reason: String,
    /// Opaque caller-supplied identifier.  The codec enforces no uniqueness
    /// and accepts the empty string.
    pub id: String,
}

impl AskRequest {
    /// An empty ask carrying only its reason and identifier.
    pub fn new(reason: impl Into<String>, id: impl Into<String>) -> AskRequest {
        let reason = reason.into();
        let reason_chars = reason.chars().count();
        if reason_chars > REASON_SOFT_LIMIT {
            warn!(
                chars = reason_chars,
                limit = REASON_SOFT_LIMIT,
                "ask reason exceeds the soft length limit; encoding it in full"
            );
        }
        AskRequest {
            matrix: SettingMatrix::new(),
            tracking: Vec::new(),
            reason,
            id: id.into(),
        }
    }

    /// Request consent for one category/purpose combination.
    pub fn request(&mut self, category: Category, purpose: Purpose) {
        self.matrix.set(category, purpose, true);
    }

    /// Request consent for one tracking target.
    pub fn request_tracking(&mut self, target: impl Into<String>) {
        self.tracking.push(target.into());
    }

    /// Build an ask from token pairs.
    ///
    /// A pair `("tracking", target)` requests the tracking target; every
    /// other pair must name a known category and purpose.  An ask is an
    /// explicit, intentional request, so a bad token is an error rather
    /// than a skip — silently dropping part of an ask would mislead the
    /// user about what they were asked.
    pub fn from_pairs(
        reason: impl Into<String>,
        id: impl Into<String>,
        pairs: &[(&str, &str)],
    ) -> Result<AskRequest, ConsentError> {
        let mut ask = AskRequest::new(reason, id);
        for &(category_token, purpose_token) in pairs {
            if category_token == TRACKING_PSEUDO_CATEGORY {
                ask.request_tracking(purpose_token);
                continue;
            }
            let category = Category::from_token(category_token)
                .ok_or_else(|| ConsentError::UnknownCategory(category_token.to_string()))?;
            let purpose = Purpose::from_token(purpose_token)
                .ok_or_else(|| ConsentError::UnknownPurpose(purpose_token.to_string()))?;
            ask.request(category, purpose);
        }
        Ok(ask)
    }
}
