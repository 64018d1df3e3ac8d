use crate::csv_handler::ColumnConfig;
use crate::error::{CrateError, Result};
use crate::taxon::config::{
    DecomposerConfig, FormaFormatting, MarkerSearch, MissingRankPolicy, ZonePolicy,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the input delimited file.
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// Path to the output file.
    #[arg(short, long, value_name = "FILE")]
    pub output_file: PathBuf,

    /// Output format: tab-separated rows or one JSON object per line.
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub mode: OutputMode,

    /// Field delimiter of the input file.
    #[arg(short, long, default_value = ",")]
    pub delimiter: String,

    /// Preset of parsing policies.
    #[arg(short, long, value_enum, default_value = "herbarium")]
    pub profile: Profile,

    /// Override how far an epithet extends.
    #[arg(long, value_enum)]
    pub zone_policy: Option<ZonePolicy>,

    /// Override hybrid formatting at forma rank.
    #[arg(long, value_enum)]
    pub forma: Option<FormaFormatting>,

    /// Override handling of records without a rank code.
    #[arg(long, value_enum)]
    pub missing_rank: Option<MissingRankPolicy>,

    /// Override where infraspecific markers are searched from.
    #[arg(long, value_enum)]
    pub marker_search: Option<MarkerSearch>,

    /// Do not treat uncertain records as new taxa.
    #[arg(long)]
    pub ignore_uncertain: bool,

    #[arg(long, default_value = "taxonfullname")]
    pub column_name: String,

    #[arg(long, default_value = "rankid")]
    pub column_rank: String,

    #[arg(long, default_value = "taxonauthor")]
    pub column_author: String,

    #[arg(long, default_value = "taxonspid")]
    pub column_aux_id: String,

    #[arg(long, default_value = "taxonomyuncertain")]
    pub column_uncertain: String,

    #[arg(long, default_value = "notes")]
    pub column_notes: String,

    #[arg(long, default_value = "taxonnumber")]
    pub column_taxon_number: String,

    #[arg(long, default_value = "taxonnrsource")]
    pub column_taxon_number_source: String,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Input columns followed by the decomposition columns, tab-separated.
    #[value(name = "tsv")]
    Tsv,
    /// One JSON object per record.
    #[value(name = "jsonl")]
    JsonLines,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    #[value(name = "herbarium")]
    Herbarium,
    #[value(name = "positional")]
    Positional,
}

impl Cli {
    /// Preset selected by `--profile` with any explicit overrides applied.
    pub fn decomposer_config(&self) -> DecomposerConfig {
        let mut config = match self.profile {
            Profile::Herbarium => DecomposerConfig::herbarium(),
            Profile::Positional => DecomposerConfig::positional(),
        };
        if let Some(zone_policy) = self.zone_policy {
            config.zone_policy = zone_policy;
        }
        if let Some(forma) = self.forma {
            config.forma_formatting = forma;
        }
        if let Some(missing_rank) = self.missing_rank {
            config.missing_rank = missing_rank;
        }
        if let Some(marker_search) = self.marker_search {
            config.marker_search = marker_search;
        }
        if self.ignore_uncertain {
            config.uncertain_marks_new = false;
        }
        config
    }

    pub fn column_config(&self) -> ColumnConfig {
        ColumnConfig {
            full_name: self.column_name.clone(),
            rank_code: self.column_rank.clone(),
            author: self.column_author.clone(),
            aux_id: self.column_aux_id.clone(),
            uncertain: self.column_uncertain.clone(),
            notes: self.column_notes.clone(),
            taxon_number: self.column_taxon_number.clone(),
            taxon_number_source: self.column_taxon_number_source.clone(),
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        let value = if self.delimiter == "\\t" { "\t" } else { self.delimiter.as_str() };
        match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(CrateError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["taxon-decompose", "-i", "in.csv", "-o", "out.tsv"]);
        assert_eq!(cli.input_file, PathBuf::from("in.csv"));
        assert_eq!(cli.output_file, PathBuf::from("out.tsv"));
        assert_eq!(cli.mode, OutputMode::Tsv);
        assert_eq!(cli.profile, Profile::Herbarium);
        assert_eq!(cli.decomposer_config(), DecomposerConfig::herbarium());
        assert_eq!(cli.delimiter_byte().unwrap(), b',');
        assert_eq!(cli.column_config(), ColumnConfig::default());
    }

    #[test]
    fn test_cli_profile_with_overrides() {
        let cli = Cli::parse_from([
            "taxon-decompose",
            "-i",
            "in.csv",
            "-o",
            "out.jsonl",
            "-m",
            "jsonl",
            "-p",
            "positional",
            "--missing-rank",
            "permissive",
            "--forma",
            "hybrid",
        ]);
        let config = cli.decomposer_config();
        assert_eq!(cli.mode, OutputMode::JsonLines);
        assert_eq!(config.zone_policy, ZonePolicy::FixedShape);
        assert_eq!(config.marker_search, MarkerSearch::AfterSpecies);
        assert_eq!(config.missing_rank, MissingRankPolicy::Permissive);
        assert_eq!(config.forma_formatting, FormaFormatting::Hybrid);
    }

    #[test]
    fn test_cli_ignore_uncertain() {
        let cli = Cli::parse_from([
            "taxon-decompose",
            "-i",
            "in.csv",
            "-o",
            "out.tsv",
            "--ignore-uncertain",
            "--zone-policy",
            "fixed",
        ]);
        let config = cli.decomposer_config();
        assert!(!config.uncertain_marks_new);
        assert_eq!(config.zone_policy, ZonePolicy::FixedShape);
    }

    #[test]
    fn test_cli_delimiters() {
        let tab = Cli::parse_from(["taxon-decompose", "-i", "a", "-o", "b", "-d", "\\t"]);
        assert_eq!(tab.delimiter_byte().unwrap(), b'\t');
        let semi = Cli::parse_from(["taxon-decompose", "-i", "a", "-o", "b", "-d", ";"]);
        assert_eq!(semi.delimiter_byte().unwrap(), b';');
        let bad = Cli::parse_from(["taxon-decompose", "-i", "a", "-o", "b", "-d", ";;"]);
        assert!(matches!(bad.delimiter_byte(), Err(CrateError::InvalidDelimiter(_))));
    }

    #[test]
    fn test_cli_missing_output() {
        assert!(Cli::try_parse_from(["taxon-decompose", "-i", "in.csv"]).is_err());
    }
}
