//! Skill token normalization and the comma-delimited storage encoding.
//!
//! Tokens are compared by exact string equality after normalization — no
//! fuzzy matching, no stemming, no synonym resolution ("js" and "javascript"
//! are distinct tokens by design).

/// Canonical form of a skill name: trimmed and lower-cased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a comma-delimited required-skills string into normalized tokens.
/// Empty segments are dropped after trimming; duplicates are preserved in
/// sequence order (the scorer collapses them).
pub fn split_required_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parses the comma-joined storage encoding of a persisted matched/missing
/// skill set back into normalized tokens. Same grammar as required-skills
/// input, named separately because it sits on the storage boundary.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    split_required_skills(raw)
}

/// Joins normalized tokens into the comma-joined storage encoding.
/// Round-trips through `parse_skill_list` order-insensitively.
pub fn join_skills(tokens: &[String]) -> String {
    tokens.join(",")
}

/// Display form of a token: first character upper-cased, rest untouched
/// ("javascript" -> "Javascript"). Never used for comparison.
pub fn display_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}
