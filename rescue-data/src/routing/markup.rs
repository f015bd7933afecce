//! Plain-text rendering of HTML step instructions.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used, reason = "the pattern is a literal known to compile")]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex pattern"));

/// Replace every tag with whitespace, then collapse whitespace runs.
///
/// Entities are left untouched.
pub(super) fn strip_tags(html: &str) -> String {
    let spaced = TAG.replace_all(html, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
