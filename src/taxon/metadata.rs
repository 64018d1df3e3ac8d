//! Author, taxon-number and new-taxon attribution for the record's own rank.
use super::rank::{Rank, RankCode};
use serde::{Deserialize, Serialize};

/// Identifier values that mean "no stable identifier yet".
const EMPTY_ID_VALUES: [&str; 3] = ["", "0", "None"];

/// Per-record values that belong to exactly one rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMetadata<'a> {
    pub author: Option<&'a str>,
    pub taxon_number: Option<&'a str>,
    pub taxon_number_source: Option<&'a str>,
    pub aux_id: Option<&'a str>,
    pub uncertain: Option<&'a str>,
}

/// Attribution received by the rank the record represents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankMetadata {
    pub author: String,
    pub taxon_number: String,
    pub taxon_number_source: String,
    pub new_flag: bool,
}

/// True when the identifier is absent, one of its empty-ish spellings, or
/// any numeric rendering of zero (`0.0`).
pub fn aux_id_missing(aux_id: Option<&str>) -> bool {
    match aux_id.map(str::trim) {
        None => true,
        Some(value) => {
            EMPTY_ID_VALUES.contains(&value) || value.parse::<f64>().is_ok_and(|id| id == 0.0)
        }
    }
}

pub fn is_uncertain(uncertain: Option<&str>) -> bool {
    uncertain.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

/// Picks the rank matching `rank_code` and builds its attribution. Codes
/// without an output field (family, unknown codes, absent) attribute nothing.
pub fn assign_metadata(
    record: &RecordMetadata<'_>,
    rank_code: Option<RankCode>,
    uncertain_marks_new: bool,
) -> Option<(Rank, RankMetadata)> {
    let rank = rank_code?.rank()?;
    let new_flag =
        aux_id_missing(record.aux_id) || (uncertain_marks_new && is_uncertain(record.uncertain));

    Some((
        rank,
        RankMetadata {
            author: record.author.unwrap_or_default().to_string(),
            taxon_number: record.taxon_number.unwrap_or_default().to_string(),
            taxon_number_source: record.taxon_number_source.unwrap_or_default().to_string(),
            new_flag,
        },
    ))
}
