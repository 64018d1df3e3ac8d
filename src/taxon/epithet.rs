use super::normalizer::is_hybrid_marker;
use super::zone::EpithetZone;

/// Renders a zone as the stored epithet.
///
/// A leading marker keeps the marker and the next token (`× brucheri`); a
/// marker inside the zone keeps the whole zone (`danica x officinalis`);
/// otherwise only the first token is kept.
pub fn format_epithet(zone: &EpithetZone<'_>) -> String {
    let tokens = zone.tokens();
    let Some(first) = tokens.first() else {
        return String::new();
    };

    if is_hybrid_marker(first) {
        return match tokens.get(1) {
            Some(next) => format!("{} {}", first, next),
            None => first.to_string(),
        };
    }
    if tokens.iter().any(|t| is_hybrid_marker(t)) {
        return tokens.join(" ");
    }
    first.to_string()
}

/// First token of the zone, without hybrid handling.
pub fn first_token(zone: &EpithetZone<'_>) -> String {
    zone.tokens()
        .first()
        .map(|t| t.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxon::zone::{AuthorOrMarkerBoundary, collect_zone};

    fn formatted(name: &str, start: usize) -> String {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        format_epithet(&collect_zone(&tokens, start, &AuthorOrMarkerBoundary))
    }

    #[test]
    fn empty_zone_is_empty_string() {
        assert_eq!(formatted("Quercus", 1), "");
    }

    #[test]
    fn leading_hybrid_keeps_glyph() {
        assert_eq!(formatted("Rosa × brucheri", 1), "× brucheri");
        assert_eq!(formatted("Rosa x brucheri extra", 1), "x brucheri");
    }

    #[test]
    fn lone_marker_is_kept() {
        assert_eq!(formatted("Rosa x", 1), "x");
    }

    #[test]
    fn internal_hybrid_joins_zone() {
        assert_eq!(
            formatted("Carex danica x officinalis L.", 1),
            "danica x officinalis"
        );
    }

    #[test]
    fn plain_epithet_drops_trailing_tokens() {
        assert_eq!(formatted("Poa annua , remota", 1), "annua");
    }

    #[test]
    fn first_token_ignores_hybrids() {
        let tokens: Vec<&str> = "Rosa x brucheri".split_whitespace().collect();
        let zone = collect_zone(&tokens, 1, &AuthorOrMarkerBoundary);
        assert_eq!(first_token(&zone), "x");
    }
}
