//! Full per-record decomposition: qualifier, segmentation, hybrid flags,
//! rank attribution and notes addendum.
use super::addendum::extract_addendum;
use super::config::{DecomposerConfig, MissingRankPolicy};
use super::hybrid::{HybridFlag, assign_hybrid_flag};
use super::metadata::{RecordMetadata, assign_metadata};
use super::qualifier::extract_qualifier;
use super::rank::{Rank, RankCode};
use super::segmenter::Segmenter;
use super::zone::ZoneBoundary;
use crate::error::{CrateError, Result};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One input row, as handed over by the tabular pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawName {
    /// Source row number used in batch error reports.
    pub row: usize,
    pub full_name: String,
    pub rank_code: Option<RankCode>,
    pub author: Option<String>,
    pub aux_id: Option<String>,
    pub uncertain: Option<String>,
    pub taxon_number: Option<String>,
    pub taxon_number_source: Option<String>,
    pub notes: Option<String>,
}

impl RawName {
    pub fn new(full_name: impl Into<String>, rank_code: Option<RankCode>) -> Self {
        Self {
            full_name: full_name.into(),
            rank_code,
            ..Default::default()
        }
    }

    fn metadata(&self) -> RecordMetadata<'_> {
        RecordMetadata {
            author: self.author.as_deref(),
            taxon_number: self.taxon_number.as_deref(),
            taxon_number_source: self.taxon_number_source.as_deref(),
            aux_id: self.aux_id.as_deref(),
            uncertain: self.uncertain.as_deref(),
        }
    }
}

/// Everything stored for one rank of a decomposed name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankField {
    pub epithet: String,
    pub author: String,
    pub taxon_number: String,
    pub taxon_number_source: String,
    pub new_flag: bool,
    /// Always `Unknown` for the genus.
    pub hybrid: HybridFlag,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposedName {
    pub genus: RankField,
    pub species: RankField,
    pub subspecies: RankField,
    pub variety: RankField,
    pub forma: RankField,
    pub qualifier: String,
    pub addendum: String,
    pub remarks: String,
}

impl DecomposedName {
    pub fn field(&self, rank: Rank) -> &RankField {
        match rank {
            Rank::Genus => &self.genus,
            Rank::Species => &self.species,
            Rank::Subspecies => &self.subspecies,
            Rank::Variety => &self.variety,
            Rank::Forma => &self.forma,
        }
    }

    pub fn field_mut(&mut self, rank: Rank) -> &mut RankField {
        match rank {
            Rank::Genus => &mut self.genus,
            Rank::Species => &mut self.species,
            Rank::Subspecies => &mut self.subspecies,
            Rank::Variety => &mut self.variety,
            Rank::Forma => &mut self.forma,
        }
    }
}

pub struct Decomposer {
    segmenter: Segmenter,
}

impl Decomposer {
    pub fn new(config: DecomposerConfig) -> Self {
        Self {
            segmenter: Segmenter::new(config),
        }
    }

    pub fn with_boundary(self, boundary: Box<dyn ZoneBoundary>) -> Self {
        Self {
            segmenter: self.segmenter.with_boundary(boundary),
        }
    }

    pub fn config(&self) -> &DecomposerConfig {
        self.segmenter.config()
    }

    /// Decomposes a single record. Never fails: blank or unparseable names
    /// produce empty fields.
    pub fn decompose(&self, raw: &RawName) -> DecomposedName {
        let mut result = DecomposedName::default();

        let full_name = raw.full_name.trim();
        let full_name = if full_name.eq_ignore_ascii_case("nan") {
            ""
        } else {
            full_name
        };

        let qualified = extract_qualifier(full_name);
        result.qualifier = qualified.qualifier;

        let segments = self.segmenter.segment(&qualified.name, raw.rank_code);
        for rank in Rank::ALL {
            result.field_mut(rank).epithet = segments.get(rank).to_string();
        }
        for rank in Rank::EPITHETS {
            let field = result.field_mut(rank);
            field.hybrid = assign_hybrid_flag(&field.epithet);
        }

        let metadata = raw.metadata();
        if let Some((rank, meta)) = assign_metadata(
            &metadata,
            raw.rank_code,
            self.config().uncertain_marks_new,
        ) {
            let field = result.field_mut(rank);
            field.author = meta.author;
            field.taxon_number = meta.taxon_number;
            field.taxon_number_source = meta.taxon_number_source;
            field.new_flag = meta.new_flag;
        }

        if let Some(notes) = raw.notes.as_deref() {
            let addendum = extract_addendum(notes);
            result.addendum = addendum.addendum;
            result.remarks = addendum.remarks;
        }

        result
    }

    /// Rows of every record without a rank code.
    pub fn missing_rank_rows(records: &[RawName]) -> Vec<usize> {
        records
            .iter()
            .filter(|r| r.rank_code.is_none())
            .map(|r| r.row)
            .collect()
    }

    /// Applies the missing-rank policy to a whole batch. Under the strict
    /// policy every offending row is reported in one error.
    pub fn validate_rank_codes(&self, records: &[RawName]) -> Result<()> {
        let missing = Self::missing_rank_rows(records);
        if missing.is_empty() {
            return Ok(());
        }
        match self.config().missing_rank {
            MissingRankPolicy::Strict => Err(CrateError::MissingRankCodes { rows: missing }),
            MissingRankPolicy::Permissive => {
                debug!(
                    "{} record(s) without rank code will keep only the genus",
                    missing.len()
                );
                Ok(())
            }
        }
    }

    /// Decomposes a batch in parallel, preserving input order. Rank codes are
    /// validated before anything is decomposed.
    pub fn decompose_batch(&self, records: &[RawName]) -> Result<Vec<DecomposedName>> {
        self.validate_rank_codes(records)?;
        let results: Vec<DecomposedName> = records.par_iter().map(|r| self.decompose(r)).collect();
        debug!("Decomposed {} record(s)", results.len());
        Ok(results)
    }
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new(DecomposerConfig::default())
    }
}
