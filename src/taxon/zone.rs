//! Epithet zones: contiguous token runs belonging to one rank.
use super::config::ZonePolicy;
use super::normalizer::{is_hybrid_marker, normalize_token};

/// Every normalized token that separates infraspecific epithets.
pub const RANK_MARKERS: [&str; 5] = ["subsp", "ssp", "var", "forma", "f"];

pub fn is_rank_marker(token: &str) -> bool {
    RANK_MARKERS.contains(&normalize_token(token).as_str())
}

/// Decides where an epithet zone stops.
pub trait ZoneBoundary: Send + Sync {
    /// True when `token` must not be part of the zone.
    fn is_boundary(&self, token: &str) -> bool;
}

/// Stops at a rank marker, or at a token that opens an author citation
/// (capitalised surname or a parenthesised basionym author).
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorOrMarkerBoundary;

impl ZoneBoundary for AuthorOrMarkerBoundary {
    fn is_boundary(&self, token: &str) -> bool {
        if is_rank_marker(token) {
            return true;
        }
        looks_like_author(token)
    }
}

pub fn looks_like_author(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c == '(')
}

/// Half-open token range `[start, end)` over a name's token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpithetZone<'a> {
    tokens: &'a [&'a str],
    start: usize,
    end: usize,
}

impl<'a> EpithetZone<'a> {
    fn new(tokens: &'a [&'a str], start: usize, end: usize) -> Self {
        let start = start.min(tokens.len());
        let end = end.clamp(start, tokens.len());
        Self { tokens, start, end }
    }

    pub fn empty(tokens: &'a [&'a str], at: usize) -> Self {
        Self::new(tokens, at, at)
    }

    pub fn tokens(&self) -> &'a [&'a str] {
        &self.tokens[self.start..self.end]
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Walks forward from `start`, collecting tokens until `boundary` fires.
pub fn collect_zone<'a>(
    tokens: &'a [&'a str],
    start: usize,
    boundary: &dyn ZoneBoundary,
) -> EpithetZone<'a> {
    let mut end = start;
    while end < tokens.len() && !boundary.is_boundary(tokens[end]) {
        end += 1;
    }
    EpithetZone::new(tokens, start, end)
}

/// Collects at most one epithet: `token`, `x token` or `token x token`.
pub fn collect_fixed_shape<'a>(
    tokens: &'a [&'a str],
    start: usize,
    boundary: &dyn ZoneBoundary,
) -> EpithetZone<'a> {
    let usable = |i: usize| tokens.get(i).is_some_and(|t| !boundary.is_boundary(t));

    if !usable(start) {
        return EpithetZone::empty(tokens, start);
    }
    if is_hybrid_marker(tokens[start]) {
        let end = if usable(start + 1) { start + 2 } else { start + 1 };
        return EpithetZone::new(tokens, start, end);
    }
    if tokens.get(start + 1).is_some_and(|t| is_hybrid_marker(t)) && usable(start + 2) {
        return EpithetZone::new(tokens, start, start + 3);
    }
    EpithetZone::new(tokens, start, start + 1)
}

/// Dispatches to the collector selected by `policy`.
pub fn collect_with_policy<'a>(
    policy: ZonePolicy,
    tokens: &'a [&'a str],
    start: usize,
    boundary: &dyn ZoneBoundary,
) -> EpithetZone<'a> {
    match policy {
        ZonePolicy::ScanUntilBoundary => collect_zone(tokens, start, boundary),
        ZonePolicy::FixedShape => collect_fixed_shape(tokens, start, boundary),
    }
}
