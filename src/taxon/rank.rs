//! Numeric rank codes and the rank fields a decomposed name can carry.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric taxonomic rank identifier as stored by the collection database.
///
/// Codes are totally ordered; a higher code is a finer rank. Codes outside the
/// named constants (e.g. subgenus) are kept as-is and only take part in the
/// ordering predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankCode(pub u32);

impl RankCode {
    pub const FAMILY: RankCode = RankCode(140);
    pub const GENUS: RankCode = RankCode(180);
    pub const SPECIES: RankCode = RankCode(220);
    pub const SUBSPECIES: RankCode = RankCode(230);
    pub const VARIETY: RankCode = RankCode(240);
    pub const FORMA: RankCode = RankCode(260);

    pub fn value(self) -> u32 {
        self.0
    }

    /// At least species rank, so a species epithet is expected.
    pub fn is_at_least_species(self) -> bool {
        self >= Self::SPECIES
    }

    /// The output field this code attributes author and new-taxon data to.
    pub fn rank(self) -> Option<Rank> {
        match self {
            Self::GENUS => Some(Rank::Genus),
            Self::SPECIES => Some(Rank::Species),
            Self::SUBSPECIES => Some(Rank::Subspecies),
            Self::VARIETY => Some(Rank::Variety),
            Self::FORMA => Some(Rank::Forma),
            _ => None,
        }
    }
}

impl From<u32> for RankCode {
    fn from(value: u32) -> Self {
        RankCode(value)
    }
}

impl fmt::Display for RankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rank-level output fields, in hierarchy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Genus,
    Species,
    Subspecies,
    Variety,
    Forma,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Rank::Genus,
        Rank::Species,
        Rank::Subspecies,
        Rank::Variety,
        Rank::Forma,
    ];

    /// Ranks that carry a hybrid flag.
    pub const EPITHETS: [Rank; 4] = [Rank::Species, Rank::Subspecies, Rank::Variety, Rank::Forma];

    pub fn code(self) -> RankCode {
        match self {
            Rank::Genus => RankCode::GENUS,
            Rank::Species => RankCode::SPECIES,
            Rank::Subspecies => RankCode::SUBSPECIES,
            Rank::Variety => RankCode::VARIETY,
            Rank::Forma => RankCode::FORMA,
        }
    }

    /// Lowercase column stem, e.g. `subspecies`.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Genus => "genus",
            Rank::Species => "species",
            Rank::Subspecies => "subspecies",
            Rank::Variety => "variety",
            Rank::Forma => "forma",
        }
    }

    /// Normalized marker tokens that introduce this rank's epithet.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Rank::Subspecies => &["subsp", "ssp"],
            Rank::Variety => &["var"],
            Rank::Forma => &["forma", "f"],
            Rank::Genus | Rank::Species => &[],
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
