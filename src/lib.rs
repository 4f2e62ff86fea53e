//! # consent-header — consent-preference header codec
//!
//! Bidirectional codec for a compact consent protocol carried over two
//! HTTP headers: the inbound `Consent-Preference` value says what the
//! client permits, per category of data and purpose of use, and the
//! outbound `Consent-Ack` value acknowledges that the preference was
//! honored, optionally asking for further consent.
//!
//! ```
//! use consent_header::{consent_given_pairs, decode, encode, AskRequest, Category, Purpose};
//!
//! // Inbound: cookies and equipment data for functional use and
//! // analytics, plus one consented tracker.
//! let state = decode("{coo equ fcn ana}{global-tracking ads.example}").unwrap();
//! assert!(consent_given_pairs(&state, &[("coo", "ana")]).unwrap());
//! assert!(consent_given_pairs(&state, &[("tracking", "ads.example")]).unwrap());
//! assert!(!consent_given_pairs(&state, &[("geo", "loc")]).unwrap());
//!
//! // Outbound: acknowledge, asking for geolocation analytics on top.
//! let mut ask = AskRequest::new("We use this to improve coverage maps", "geo-1");
//! ask.request(Category::Geo, Purpose::Ana);
//! let header = encode(state.preference_communicated, &[ask]);
//! assert_eq!(
//!     header.as_deref(),
//!     Some("ACK {ASK {{geo ana}} ID{geo-1} TXT{We use this to improve coverage maps}}"),
//! );
//! ```
//!
//! ## Wire format
//!
//! Inbound values concatenate brace groups.  A *setting* group mixes
//! category and purpose tokens and grants their cross product; the
//! *tracking* group `{global-tracking t1,t2}` lists consented tracking
//! targets; the reserved whole-value literal `{NOT}` grants nothing.
//! Outbound values are `ACK`, or `ACK {ASK ...}` with one
//! `{...} ID{...} TXT{...}` fragment per ask.  [`decode`] is lenient
//! (unknown tokens skip with a diagnostic, so newer clients degrade
//! gracefully); [`encode`] output is canonical and deterministic.
//!
//! ## Scope
//!
//! The codec is sans-I/O and never touches a request or response object.
//! The embedding HTTP layer is expected to:
//!
//! * extract the inbound header and call [`decode`], using
//!   [`ConsentState::no_preference`] when the header is absent;
//! * add [`CONSENT_HEADER`] to the response `Vary` list whenever it emits
//!   an outbound value, so shared caches never cross consent boundaries;
//! * call [`encode`] exactly once, when response headers are finalized,
//!   and set [`ACK_HEADER`] when a value comes back.
//!
//! Persisting user responses to asks is likewise the application's job.
//!
//! All types are plain owned values without interior mutability, so state
//! may be shared across tasks freely once built.

pub mod decode;
pub mod encode;
pub mod errors;
pub mod groups;
pub mod query;
pub mod state;
pub mod vocabulary;

pub use decode::decode;
pub use encode::encode;
pub use errors::ConsentError;
pub use groups::{compact, render_groups, Group};
pub use query::{consent_given, consent_given_pairs, ConsentPair};
pub use state::{any_true, AskRequest, ConsentState, SettingMatrix};
pub use vocabulary::{Category, Purpose, ACK_HEADER, CONSENT_HEADER};
