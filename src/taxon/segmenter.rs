//! Rank-driven segmentation of a whitespace-tokenised scientific name.
use super::config::{DecomposerConfig, FormaFormatting, MarkerSearch};
use super::epithet::{first_token, format_epithet};
use super::normalizer::normalize_token;
use super::rank::{Rank, RankCode};
use super::zone::{AuthorOrMarkerBoundary, ZoneBoundary, collect_with_policy};
use log::debug;
use serde::{Deserialize, Serialize};

/// Epithets recovered from a name. Tokens are stored verbatim, so case and
/// the hybrid glyph survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segments {
    pub genus: String,
    pub species: String,
    pub subspecies: String,
    pub variety: String,
    pub forma: String,
}

impl Segments {
    pub fn get(&self, rank: Rank) -> &str {
        match rank {
            Rank::Genus => &self.genus,
            Rank::Species => &self.species,
            Rank::Subspecies => &self.subspecies,
            Rank::Variety => &self.variety,
            Rank::Forma => &self.forma,
        }
    }

    fn slot(&mut self, rank: Rank) -> &mut String {
        match rank {
            Rank::Genus => &mut self.genus,
            Rank::Species => &mut self.species,
            Rank::Subspecies => &mut self.subspecies,
            Rank::Variety => &mut self.variety,
            Rank::Forma => &mut self.forma,
        }
    }
}

pub struct Segmenter {
    config: DecomposerConfig,
    boundary: Box<dyn ZoneBoundary>,
}

impl Segmenter {
    pub fn new(config: DecomposerConfig) -> Self {
        Self {
            config,
            boundary: Box::new(AuthorOrMarkerBoundary),
        }
    }

    /// Swaps the author-boundary heuristic.
    pub fn with_boundary(mut self, boundary: Box<dyn ZoneBoundary>) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Splits `full_name` into the fields that `rank_code` calls for.
    ///
    /// A missing rank code keeps only the genus. An absent infraspecific
    /// marker leaves that field empty.
    pub fn segment(&self, full_name: &str, rank_code: Option<RankCode>) -> Segments {
        let mut segments = Segments::default();
        let tokens: Vec<&str> = full_name.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return segments;
        };

        if rank_code != Some(RankCode::FAMILY) {
            segments.genus = first.to_string();
        }
        let Some(code) = rank_code else {
            return segments;
        };
        if !code.is_at_least_species() {
            return segments;
        }

        let species_zone =
            collect_with_policy(self.config.zone_policy, &tokens, 1, &*self.boundary);
        segments.species = format_epithet(&species_zone);

        let rank = match code.rank() {
            Some(rank @ (Rank::Subspecies | Rank::Variety | Rank::Forma)) => rank,
            _ => return segments,
        };

        let search_from = match self.config.marker_search {
            MarkerSearch::FromStart => 0,
            MarkerSearch::AfterSpecies => species_zone.end(),
        };
        let Some(marker_at) = find_marker(&tokens, search_from, rank.markers()) else {
            debug!("No {} marker in '{}'; leaving it empty", rank, full_name);
            return segments;
        };

        let zone = collect_with_policy(
            self.config.zone_policy,
            &tokens,
            marker_at + 1,
            &*self.boundary,
        );
        *segments.slot(rank) = match (rank, self.config.forma_formatting) {
            (Rank::Forma, FormaFormatting::FirstTokenOnly) => first_token(&zone),
            _ => format_epithet(&zone),
        };
        segments
    }
}

fn find_marker(tokens: &[&str], from: usize, markers: &[&str]) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, t)| markers.contains(&normalize_token(t).as_str()))
        .map(|(i, _)| i)
}
