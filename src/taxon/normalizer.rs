/// Multiplication sign used as a hybrid marker in printed names.
pub const HYBRID_GLYPH: char = '×';

/// Canonical comparison form of a token: hybrid glyph folded to `x`,
/// lowercased, one trailing period removed. Never used for stored values.
pub fn normalize_token(token: &str) -> String {
    let folded = token.replace(HYBRID_GLYPH, "x").to_lowercase();
    match folded.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => folded,
    }
}

/// True when the token is a standalone hybrid marker (`x`, `X`, `×`, `x.`).
pub fn is_hybrid_marker(token: &str) -> bool {
    normalize_token(token) == "x"
}
