//! Placeholder token wire format.
//!
//! Tokens have the shape `<ENTITY_TYPE_N>`: a leading `<`, the uppercase
//! entity type name, an underscore, a zero-based decimal index with no
//! leading zeros, and a trailing `>`. Anything else — including bracketed
//! text that merely looks similar — is not a token and passes through the
//! deanonymizer untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use shield_core::EntityType;

/// Matches every well-formed placeholder token inside a document.
pub(crate) static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Z][A-Z_]*)_(0|[1-9][0-9]*)>").expect("token pattern compiles"));

/// Formats the placeholder token for an entity type and index.
#[must_use]
pub fn format_token(entity_type: &EntityType, index: u32) -> String {
    format!("<{}_{}>", entity_type.as_str(), index)
}

/// Parses a placeholder token back into its entity type and index.
///
/// Returns `None` for any string that does not match the token grammar
/// exactly — missing delimiters, lowercase type names, empty or
/// leading-zero indices, trailing garbage.
#[must_use]
pub fn parse_token(token: &str) -> Option<(EntityType, u32)> {
    let caps = TOKEN_PATTERN.captures(token)?;
    let matched = caps.get(0)?;
    if matched.start() != 0 || matched.end() != token.len() {
        return None;
    }
    let entity_type = EntityType::new(caps.get(1)?.as_str()).ok()?;
    let index = caps.get(2)?.as_str().parse().ok()?;
    Some((entity_type, index))
}

/// Extracts the numeric suffix from a stored token.
///
/// The mapping store derives its next counter value from whatever tokens a
/// loaded mapping actually contains rather than trusting a stored counter;
/// a hand-edited or partially written file may skip indices. Tokens that do
/// not follow the grammar yield `None` and are ignored for counting.
#[must_use]
pub(crate) fn token_index(token: &str) -> Option<u32> {
    parse_token(token).map(|(_, index)| index)
}
