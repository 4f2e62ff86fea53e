//! Wire-level conformance suite.
//!
//! Every test here pins exact header strings, both directions.  The
//! vectors come from the protocol's end-to-end scenarios plus the edge
//! cases the decoder's leniency rules promise: unknown tokens, stray
//! characters, empty groups, repeated tracking groups, and the reserved
//! `{NOT}` literal.  Property-based coverage lives in `roundtrip.rs`.

use consent_header::*;

// ── Helpers ─────────────────────────────────────────────────

fn count_true(matrix: &SettingMatrix) -> usize {
    Category::ALL
        .iter()
        .map(|&category| {
            Purpose::ALL
                .iter()
                .filter(|&&purpose| matrix.get(category, purpose))
                .count()
        })
        .sum()
}

// ── End-to-end scenarios ────────────────────────────────────

#[test]
fn scenario_a_cross_product_decode_and_query() {
    let state = decode("{coo equ ana per}").unwrap();
    assert!(state.preference_communicated);
    for category in [Category::Coo, Category::Equ] {
        for purpose in [Purpose::Ana, Purpose::Per] {
            assert!(state.matrix.get(category, purpose), "{category:?}/{purpose:?}");
        }
    }
    assert_eq!(count_true(&state.matrix), 4, "nothing beyond the cross product");
    assert_eq!(consent_given_pairs(&state, &[("coo", "ana")]), Ok(true));
    assert_eq!(consent_given_pairs(&state, &[("geo", "ana")]), Ok(false));
}

#[test]
fn scenario_b_bare_ack() {
    assert_eq!(encode(true, &[]).as_deref(), Some("ACK"));
}

#[test]
fn scenario_c_single_ask() {
    let mut ask = AskRequest::new("We need analytics", "req1");
    ask.request(Category::Coo, Purpose::Ana);
    assert_eq!(
        encode(true, &[ask]).as_deref(),
        Some("ACK {ASK {{coo ana}} ID{req1} TXT{We need analytics}}")
    );
}

#[test]
fn scenario_d_tracking_only_header() {
    let state = decode("{global-tracking adv1,adv2}").unwrap();
    assert_eq!(count_true(&state.matrix), 0);
    assert_eq!(state.tracking, vec!["adv1".to_string(), "adv2".to_string()]);
    assert_eq!(consent_given_pairs(&state, &[("tracking", "adv1")]), Ok(true));
    assert_eq!(consent_given_pairs(&state, &[("tracking", "adv3")]), Ok(false));
}

// ── Reserved literal and absence ────────────────────────────

#[test]
fn nothing_literal_is_communicated_but_grants_nothing() {
    let state = decode("{NOT}").unwrap();
    assert!(state.preference_communicated);
    assert_eq!(count_true(&state.matrix), 0);
    assert!(state.tracking.is_empty());
    assert!(!consent_given_pairs(&state, &[("coo", "fcn")]).unwrap());
}

#[test]
fn nothing_literal_differs_from_absent_header() {
    let sent_nothing = decode("{NOT}").unwrap();
    let never_sent = ConsentState::no_preference();
    assert!(sent_nothing.preference_communicated);
    assert!(!never_sent.preference_communicated);
    // Same matrix, opposite meaning for the empty query.
    assert!(consent_given(&sent_nothing, &[]));
    assert!(!consent_given(&never_sent, &[]));
}

#[test]
fn nothing_literal_only_matches_the_whole_value() {
    // With extra content this is an ordinary header whose "NOT" token is
    // unknown, which happens to decode to the same all-false state.
    let state = decode("{NOT}{coo fcn}").unwrap();
    assert!(state.preference_communicated);
    assert!(state.matrix.get(Category::Coo, Purpose::Fcn));
    assert_eq!(count_true(&state.matrix), 1);
}

// ── Decoder leniency ────────────────────────────────────────

#[test]
fn unknown_tokens_are_skipped_not_fatal() {
    let state = decode("{coo xyz ana}").unwrap();
    assert!(state.matrix.get(Category::Coo, Purpose::Ana));
    assert_eq!(count_true(&state.matrix), 1);
}

#[test]
fn characters_outside_braces_are_ignored() {
    let plain = decode("{coo fcn}").unwrap();
    let noisy = decode("junk {coo fcn} trailing").unwrap();
    assert_eq!(noisy, plain);
}

#[test]
fn empty_groups_are_ignored() {
    let plain = decode("{coo fcn}").unwrap();
    let padded = decode("{}{coo fcn}{}").unwrap();
    assert_eq!(padded, plain);
}

#[test]
fn doubled_spaces_inside_a_group_are_harmless() {
    let state = decode("{coo  fcn}").unwrap();
    assert!(state.matrix.get(Category::Coo, Purpose::Fcn));
    assert_eq!(count_true(&state.matrix), 1);
}

#[test]
fn unterminated_trailing_group_is_dropped() {
    let state = decode("{coo fcn}{equ ana").unwrap();
    assert!(state.matrix.get(Category::Coo, Purpose::Fcn));
    assert_eq!(count_true(&state.matrix), 1);
}

#[test]
fn groupless_value_reads_as_consent_to_nothing() {
    let state = decode("complete garbage").unwrap();
    assert!(state.preference_communicated);
    assert_eq!(count_true(&state.matrix), 0);
    assert!(state.tracking.is_empty());
}

#[test]
fn groups_accumulate_in_any_order() {
    let forward = decode("{coo fcn}{geo loc}{global-tracking adv1}").unwrap();
    let backward = decode("{global-tracking adv1}{geo loc}{coo fcn}").unwrap();
    assert_eq!(forward, backward);
    assert!(forward.matrix.get(Category::Coo, Purpose::Fcn));
    assert!(forward.matrix.get(Category::Geo, Purpose::Loc));
    assert_eq!(forward.tracking, vec!["adv1".to_string()]);
}

#[test]
fn repeated_setting_groups_are_idempotent() {
    let once = decode("{coo fcn}").unwrap();
    let twice = decode("{coo fcn}{coo fcn}").unwrap();
    assert_eq!(twice, once);
}

// ── Tracking group edge cases ───────────────────────────────

#[test]
fn later_tracking_group_wins() {
    let state = decode("{global-tracking adv1,adv2}{global-tracking adv3}").unwrap();
    assert_eq!(state.tracking, vec!["adv3".to_string()]);
}

#[test]
fn empty_tracking_group_overrides_an_earlier_one() {
    let state = decode("{global-tracking adv1}{global-tracking}").unwrap();
    assert!(state.tracking.is_empty());
    assert!(state.preference_communicated);
}

#[test]
fn tracking_literal_is_detected_anywhere_in_the_group() {
    let state = decode("{x global-tracking adv9}").unwrap();
    assert_eq!(state.tracking, vec!["adv9".to_string()]);
    assert_eq!(count_true(&state.matrix), 0);
}

#[test]
fn empty_targets_between_commas_are_dropped() {
    let state = decode("{global-tracking adv1,,adv2,}").unwrap();
    assert_eq!(state.tracking, vec!["adv1".to_string(), "adv2".to_string()]);
}

// ── Canonical compaction ────────────────────────────────────

#[test]
fn compaction_merges_sorts_and_orders_groups() {
    let mut matrix = SettingMatrix::new();
    matrix.set(Category::Coo, Purpose::Fcn, true);
    matrix.set(Category::Coo, Purpose::Ana, true);
    matrix.set(Category::Equ, Purpose::Ana, true);
    matrix.set(Category::Coo, Purpose::Per, true);
    matrix.set(Category::Equ, Purpose::Per, true);
    matrix.set(Category::Geo, Purpose::Loc, true);
    assert_eq!(render_groups(&compact(&matrix)), "{coo fcn}{geo loc}{coo equ ana per}");
}

#[test]
fn in_group_order_is_token_order_not_vocabulary_order() {
    let mut matrix = SettingMatrix::new();
    matrix.set(Category::Sfw, Purpose::Adm, true);
    matrix.set(Category::Geo, Purpose::Adm, true);
    // geo precedes sfw by token even though sfw precedes geo in the
    // vocabulary declaration.
    assert_eq!(render_groups(&compact(&matrix)), "{geo sfw adm}");
}

#[test]
fn all_false_matrix_compacts_to_nothing() {
    assert!(compact(&SettingMatrix::new()).is_empty());
    assert_eq!(render_groups(&[]), "");
}

#[test]
fn compaction_output_decodes_back() {
    let mut matrix = SettingMatrix::new();
    matrix.set(Category::Coo, Purpose::Fcn, true);
    matrix.set(Category::Geo, Purpose::Loc, true);
    let wire = render_groups(&compact(&matrix));
    let state = decode(&wire).unwrap();
    assert_eq!(state.matrix, matrix);
}

// ── Encoder framing ─────────────────────────────────────────

#[test]
fn multiple_asks_concatenate_without_separator() {
    let mut first = AskRequest::new("We need analytics", "req1");
    first.request(Category::Coo, Purpose::Ana);
    let mut second = AskRequest::new("Partner attribution", "req2");
    second.request_tracking("adv1");
    assert_eq!(
        encode(true, &[first, second]).as_deref(),
        Some(
            "ACK {ASK {{coo ana}} ID{req1} TXT{We need analytics}\
             {{global-tracking adv1}} ID{req2} TXT{Partner attribution}}"
        )
    );
}

#[test]
fn ask_with_settings_and_tracking_shares_one_outer_brace() {
    let mut ask = AskRequest::new("Ads and measurement", "req3");
    ask.request(Category::Coo, Purpose::Ana);
    ask.request_tracking("adv1");
    ask.request_tracking("adv2");
    assert_eq!(
        encode(true, &[ask]).as_deref(),
        Some("ACK {ASK {{coo ana}{global-tracking adv1,adv2}} ID{req3} TXT{Ads and measurement}}")
    );
}

#[test]
fn ask_requesting_nothing_still_frames_id_and_reason() {
    let ask = AskRequest::new("Placeholder", "req4");
    assert_eq!(
        encode(true, &[ask]).as_deref(),
        Some("ACK {ASK {} ID{req4} TXT{Placeholder}}")
    );
}

#[test]
fn ask_ordering_is_caller_ordering() {
    let mut a = AskRequest::new("first", "a");
    a.request(Category::Coo, Purpose::Fcn);
    let mut b = AskRequest::new("second", "b");
    b.request(Category::Geo, Purpose::Loc);
    let forward = encode(true, &[a.clone(), b.clone()]).unwrap();
    let backward = encode(true, &[b, a]).unwrap();
    assert_ne!(forward, backward);
    assert!(forward.contains("ID{a}"));
    assert!(forward.find("ID{a}").unwrap() < forward.find("ID{b}").unwrap());
}

// ── Determinism ─────────────────────────────────────────────

#[test]
fn equal_states_render_identical_headers() {
    let mut ask = AskRequest::new("We need analytics", "req1");
    ask.request(Category::Coo, Purpose::Ana);
    ask.request(Category::Equ, Purpose::Ana);
    let once = encode(true, &[ask.clone()]);
    let again = encode(true, &[ask]);
    assert_eq!(once, again);
}
