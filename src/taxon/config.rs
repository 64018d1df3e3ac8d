//! Policy switches covering the behavioural differences between pipelines.
use serde::{Deserialize, Serialize};

/// How far an epithet zone extends from its first token.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZonePolicy {
    /// Collect tokens until a rank marker or an author-like token.
    #[default]
    #[value(name = "scan")]
    ScanUntilBoundary,
    /// Take one epithet: `token`, `x token` or `token x token`.
    #[value(name = "fixed")]
    FixedShape,
}

/// Whether the forma epithet gets the same hybrid formatting as other ranks.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormaFormatting {
    #[default]
    #[value(name = "first-token")]
    FirstTokenOnly,
    #[value(name = "hybrid")]
    Hybrid,
}

/// What to do with records that have no rank code.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingRankPolicy {
    /// Keep the genus, skip everything below it.
    #[default]
    Permissive,
    /// Fail the whole batch, listing every record without a rank code.
    Strict,
}

/// Where the search for an infraspecific marker begins.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSearch {
    #[default]
    #[value(name = "start")]
    FromStart,
    #[value(name = "after-species")]
    AfterSpecies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposerConfig {
    pub zone_policy: ZonePolicy,
    pub forma_formatting: FormaFormatting,
    pub missing_rank: MissingRankPolicy,
    pub marker_search: MarkerSearch,
    /// An "uncertain" record counts as a new taxon.
    pub uncertain_marks_new: bool,
}

impl DecomposerConfig {
    /// Greedy zones, marker search from the start of the name, tolerant of
    /// missing ranks. Matches the herbarium export pipeline.
    pub fn herbarium() -> Self {
        Self {
            zone_policy: ZonePolicy::ScanUntilBoundary,
            forma_formatting: FormaFormatting::FirstTokenOnly,
            missing_rank: MissingRankPolicy::Permissive,
            marker_search: MarkerSearch::FromStart,
            uncertain_marks_new: true,
        }
    }

    /// Single fixed-shape epithets read in order after the species, strict
    /// about rank codes, uncertainty ignored for new-taxon flags.
    pub fn positional() -> Self {
        Self {
            zone_policy: ZonePolicy::FixedShape,
            forma_formatting: FormaFormatting::FirstTokenOnly,
            missing_rank: MissingRankPolicy::Strict,
            marker_search: MarkerSearch::AfterSpecies,
            uncertain_marks_new: false,
        }
    }
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self::herbarium()
    }
}
