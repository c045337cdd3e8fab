//! Index extraction from marker payloads.
//!
//! A payload such as `annotation=3` links the marker to the third stored
//! annotation body. Anything else in the payload is kept as display text but
//! carries no index.

use std::sync::OnceLock;

use regex::Regex;

fn index_regex() -> &'static Regex {
    static INDEX_REGEX: OnceLock<Regex> = OnceLock::new();
    INDEX_REGEX.get_or_init(|| Regex::new(r"annotation=(\d+)").expect("Invalid index regex"))
}

/// The integer after the first `annotation=` in `payload`, if any.
///
/// No digits, or a number too large for `u32`, yields `None`.
pub fn parse_index(payload: &str) -> Option<u32> {
    let captures = index_regex().captures(payload)?;
    captures.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("annotation=42", Some(42))]
    #[case::zero("annotation=0", Some(0))]
    #[case::leading_zeros("annotation=007", Some(7))]
    #[case::surrounding_text("see annotation=5 here", Some(5))]
    #[case::first_wins("annotation=1 annotation=2", Some(1))]
    #[case::trailing_garbage("annotation=12abc", Some(12))]
    #[case::no_digits("annotation=", None)]
    #[case::unrelated("foo", None)]
    #[case::empty("", None)]
    #[case::wrong_case("Annotation=3", None)]
    #[case::overflow("annotation=99999999999", None)]
    fn extracts_index(#[case] payload: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_index(payload), expected);
    }
}
