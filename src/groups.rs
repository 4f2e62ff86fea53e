//! Grouping compactor: setting matrix → compact wire groups.
//!
//! The wire format allows any set of cross-product groups whose union is
//! the matrix, so the same matrix has many renderings.  This module picks
//! one canonical, minimal rendering:
//!
//!   1. purposes with an identical true-category set share one group
//!      (one group per distinct category set);
//!   2. within a group, categories and purposes are each ordered
//!      lexicographically by wire token;
//!   3. groups are ordered by rendered length, ties by rendered text.
//!
//! Determinism is a sender-side contract (byte-identical output for equal
//! matrices, useful for caching and tests); receivers must not rely on it.
//!
//! Example: granting `fcn` on `coo`, `ana`+`per` on `coo`+`equ`, and `loc`
//! on `geo` renders as `{coo fcn}{geo loc}{coo equ ana per}`.

use crate::state::SettingMatrix;
use crate::vocabulary::{Category, Purpose};

/// One compacted setting group: the cross product of `categories` and
/// `purposes`, all granted.
///
/// Fields hold at least one element each and are sorted by wire token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub categories: Vec<Category>,
    pub purposes: Vec<Purpose>,
}

/// Compact a matrix into its canonical group list.
///
/// An all-false matrix compacts to no groups at all; the caller decides
/// what absence means on the wire.
pub fn compact(matrix: &SettingMatrix) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for purpose in Purpose::ALL {
        let mut categories: Vec<Category> = Category::ALL
            .iter()
            .copied()
            .filter(|&category| matrix.get(category, purpose))
            .collect();
        if categories.is_empty() {
            continue;
        }
        // Token order, not vocabulary order: "geo" sorts before "sfw".
        categories.sort_by_key(|category| category.token());
        match groups.iter().position(|group| group.categories == categories) {
            Some(at) => groups[at].purposes.push(purpose),
            None => groups.push(Group { categories, purposes: vec![purpose] }),
        }
    }
    for group in &mut groups {
        group.purposes.sort_by_key(|purpose| purpose.token());
    }
    // Tokens are ASCII, so byte length doubles as display length.
    groups.sort_by_cached_key(|group| {
        let rendered = render_group(group);
        (rendered.len(), rendered)
    });
    groups
}

/// Render one group as `{token token ...}`, categories first.
pub fn render_group(group: &Group) -> String {
    let tokens: Vec<&str> = group
        .categories
        .iter()
        .map(|category| category.token())
        .chain(group.purposes.iter().map(|purpose| purpose.token()))
        .collect();
    format!("{{{}}}", tokens.join(" "))
}

/// Render a group list as the concatenated wire form.
pub fn render_groups(groups: &[Group]) -> String {
    groups.iter().map(render_group).collect()
}
