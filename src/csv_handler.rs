use crate::error::{CrateError, Result};
use crate::taxon::{DecomposedName, Rank, RankCode, RawName};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info, warn};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Input column names for each field the decomposer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    pub full_name: String,
    pub rank_code: String,
    pub author: String,
    pub aux_id: String,
    pub uncertain: String,
    pub notes: String,
    pub taxon_number: String,
    pub taxon_number_source: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            full_name: "taxonfullname".to_string(),
            rank_code: "rankid".to_string(),
            author: "taxonauthor".to_string(),
            aux_id: "taxonspid".to_string(),
            uncertain: "taxonomyuncertain".to_string(),
            notes: "notes".to_string(),
            taxon_number: "taxonnumber".to_string(),
            taxon_number_source: "taxonnrsource".to_string(),
        }
    }
}

/// Input rows kept verbatim for pass-through output.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

// Loads the delimited file and maps every row to a RawName.
pub fn load_records(
    file_path: &Path,
    delimiter: u8,
    columns: &ColumnConfig,
) -> Result<(SourceTable, Vec<RawName>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(file_path)?;
    let headers: StringRecord = reader.headers()?.iter().map(str::trim).collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let full_name_idx = position(columns.full_name.as_str())
        .ok_or_else(|| CrateError::MissingHeader(columns.full_name.clone()))?;
    let rank_idx = position(columns.rank_code.as_str())
        .ok_or_else(|| CrateError::MissingHeader(columns.rank_code.clone()))?;
    let author_idx = position(columns.author.as_str());
    let aux_id_idx = position(columns.aux_id.as_str());
    let uncertain_idx = position(columns.uncertain.as_str());
    let notes_idx = position(columns.notes.as_str());
    let taxon_number_idx = position(columns.taxon_number.as_str());
    let taxon_number_source_idx = position(columns.taxon_number_source.as_str());

    let mut rows = Vec::new();
    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let row_num = i + 2; // +1 for header, +1 for 0-based index

        let cell = |idx: Option<usize>| {
            idx.and_then(|idx| row.get(idx))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let rank_code = match parse_rank_code(row.get(rank_idx).unwrap_or_default(), row_num) {
            Ok(code) => code,
            Err(e) => {
                warn!("{}; treating it as missing", e);
                None
            }
        };

        records.push(RawName {
            row: row_num,
            full_name: row.get(full_name_idx).unwrap_or_default().to_string(),
            rank_code,
            author: cell(author_idx),
            aux_id: cell(aux_id_idx),
            uncertain: cell(uncertain_idx),
            taxon_number: cell(taxon_number_idx),
            taxon_number_source: cell(taxon_number_source_idx),
            notes: cell(notes_idx),
        });
        rows.push(row);
    }

    info!("Loaded {} record(s) from {:?}", records.len(), file_path);
    Ok((SourceTable { headers, rows }, records))
}

/// Parses a rank cell. Blank, `nan` and `None` are absent; `230.0` is 230.
pub fn parse_rank_code(value: &str, row: usize) -> Result<Option<RankCode>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed == "None" {
        return Ok(None);
    }
    if let Ok(code) = trimmed.parse::<u32>() {
        return Ok(Some(RankCode(code)));
    }
    match trimmed.parse::<f64>() {
        Ok(code) if code.fract() == 0.0 && code >= 0.0 && code <= u32::MAX as f64 => {
            Ok(Some(RankCode(code as u32)))
        }
        _ => Err(CrateError::InvalidRankCode {
            value: trimmed.to_string(),
            row,
        }),
    }
}

/// Names of the appended decomposition columns, in output order.
pub fn decomposition_headers() -> Vec<String> {
    let mut headers = Vec::new();
    for rank in Rank::ALL {
        let name = rank.name();
        headers.push(name.to_string());
        headers.push(format!("{}_author", name));
        headers.push(format!("{}_taxonnumber", name));
        headers.push(format!("{}_taxonnrsource", name));
        headers.push(format!("new{}flag", name));
        if rank != Rank::Genus {
            headers.push(format!("ishybrid_{}", name));
        }
    }
    headers.extend(["qualifier", "addendum", "remarks"].map(String::from));
    headers
}

fn decomposition_cells(name: &DecomposedName) -> Vec<String> {
    let mut cells = Vec::new();
    for rank in Rank::ALL {
        let field = name.field(rank);
        cells.push(field.epithet.clone());
        cells.push(field.author.clone());
        cells.push(field.taxon_number.clone());
        cells.push(field.taxon_number_source.clone());
        cells.push(new_flag_label(field.new_flag).to_string());
        if rank != Rank::Genus {
            cells.push(field.hybrid.as_cell().to_string());
        }
    }
    cells.push(name.qualifier.clone());
    cells.push(name.addendum.clone());
    cells.push(name.remarks.clone());
    cells
}

// Writes the input columns plus the decomposition columns as TSV. Input
// columns sharing a name with a decomposition column are replaced.
pub fn write_tsv(path: &Path, table: &SourceTable, results: &[DecomposedName]) -> Result<()> {
    let appended = decomposition_headers();
    let kept: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !appended.iter().any(|a| a == *h))
        .map(|(i, _)| i)
        .collect();
    if kept.len() < table.headers.len() {
        debug!(
            "Replacing {} input column(s) with decomposition output",
            table.headers.len() - kept.len()
        );
    }

    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    let header_row: Vec<&str> = kept
        .iter()
        .filter_map(|&i| table.headers.get(i))
        .chain(appended.iter().map(String::as_str))
        .collect();
    writer.write_record(&header_row)?;

    for (row, result) in table.rows.iter().zip(results) {
        let mut cells: Vec<String> = kept
            .iter()
            .map(|&i| row.get(i).unwrap_or_default().to_string())
            .collect();
        cells.extend(decomposition_cells(result));
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_json_lines(path: &Path, results: &[DecomposedName]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for result in results {
        serde_json::to_writer(&mut writer, result)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn new_flag_label(flag: bool) -> &'static str {
    if flag { "True" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxon::config::MissingRankPolicy;
    use crate::taxon::{Decomposer, DecomposerConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_records() {
        let content = "catalognumber;taxonfullname;rankid;taxonauthor;taxonspid;taxonomyuncertain\n\
                       1;Carex nigra;220;(L.) Reichard;55;False\n\
                       2;Quercus;180;;;\n\
                       3;Poa annua;;L.;0;";
        let file = create_test_csv(content);
        let (table, records) =
            load_records(file.path(), b';', &ColumnConfig::default()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[0].rank_code, Some(RankCode::SPECIES));
        assert_eq!(records[0].author.as_deref(), Some("(L.) Reichard"));
        assert_eq!(records[1].author, None);
        assert_eq!(records[1].aux_id, None);
        assert_eq!(records[2].rank_code, None);
        assert_eq!(records[2].notes, None);
    }

    #[test]
    fn test_missing_header() {
        let file = create_test_csv("taxonfullname,taxonauthor\nCarex nigra,L.");
        let result = load_records(file.path(), b',', &ColumnConfig::default());
        assert!(matches!(result, Err(CrateError::MissingHeader(h)) if h == "rankid"));
    }

    #[test]
    fn test_unparseable_rank_codes_are_missing() {
        let file = create_test_csv(
            "taxonfullname,rankid,taxonspid\n\
             Carex nigra,220,1\n\
             Poa annua,unknown,5\n\
             Salix alba,#N/A,5",
        );
        let (_, records) = load_records(file.path(), b',', &ColumnConfig::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].rank_code, Some(RankCode::SPECIES));
        assert_eq!(records[1].rank_code, None);
        assert_eq!(records[2].rank_code, None);

        let permissive = Decomposer::new(DecomposerConfig {
            missing_rank: MissingRankPolicy::Permissive,
            ..DecomposerConfig::herbarium()
        });
        let results = permissive.decompose_batch(&records).unwrap();
        assert_eq!(results[1].genus.epithet, "Poa");
        assert!(results[1].species.epithet.is_empty());
        assert_eq!(results[2].genus.epithet, "Salix");
        assert!(results[2].species.epithet.is_empty());

        let strict = Decomposer::new(DecomposerConfig {
            missing_rank: MissingRankPolicy::Strict,
            ..DecomposerConfig::herbarium()
        });
        let result = strict.decompose_batch(&records);
        assert!(matches!(
            result,
            Err(CrateError::MissingRankCodes { rows }) if rows == vec![3, 4]
        ));
    }

    #[test]
    fn test_parse_rank_code_variants() {
        assert_eq!(parse_rank_code("230", 2).unwrap(), Some(RankCode::SUBSPECIES));
        assert_eq!(parse_rank_code(" 240.0 ", 2).unwrap(), Some(RankCode::VARIETY));
        assert_eq!(parse_rank_code("", 2).unwrap(), None);
        assert_eq!(parse_rank_code("nan", 2).unwrap(), None);
        assert_eq!(parse_rank_code("None", 2).unwrap(), None);
        assert!(matches!(
            parse_rank_code("species", 3),
            Err(CrateError::InvalidRankCode { value, row }) if value == "species" && row == 3
        ));
        assert!(parse_rank_code("230.5", 2).is_err());
    }

    #[test]
    fn test_malformed_csv() {
        let file = create_test_csv("taxonfullname,rankid\nCarex nigra,220,extra");
        let result = load_records(file.path(), b',', &ColumnConfig::default());
        assert!(matches!(result, Err(CrateError::CsvError(_))));
    }

    #[test]
    fn test_write_tsv_passes_columns_through() {
        let input = create_test_csv(
            "catalognumber,taxonfullname,rankid,taxonauthor,taxonspid,genus\n\
             7,Carex × danica L. subsp. arctica (Blytt) Hartm.,230,(Blytt) Hartm.,,stale",
        );
        let (table, records) =
            load_records(input.path(), b',', &ColumnConfig::default()).unwrap();
        let results = Decomposer::default().decompose_batch(&records).unwrap();

        let output = NamedTempFile::new().unwrap();
        write_tsv(output.path(), &table, &results).unwrap();

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(output.path())
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let value = |name: &str| {
            let idx = headers.iter().position(|h| h == name).unwrap();
            row.get(idx).unwrap().to_string()
        };

        assert_eq!(headers.iter().filter(|h| *h == "genus").count(), 1);
        assert_eq!(&headers[0], "catalognumber");
        assert_eq!(value("catalognumber"), "7");
        assert_eq!(value("genus"), "Carex");
        assert_eq!(value("species"), "× danica");
        assert_eq!(value("ishybrid_species"), "True");
        assert_eq!(value("subspecies"), "arctica");
        assert_eq!(value("ishybrid_subspecies"), "False");
        assert_eq!(value("subspecies_author"), "(Blytt) Hartm.");
        assert_eq!(value("newsubspeciesflag"), "True");
        assert_eq!(value("newspeciesflag"), "");
        assert_eq!(value("ishybrid_variety"), "");
    }

    #[test]
    fn test_write_json_lines() {
        let results = vec![DecomposedName::default(), DecomposedName::default()];
        let output = NamedTempFile::new().unwrap();
        write_json_lines(output.path(), &results).unwrap();
        let content = std::fs::read_to_string(output.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: DecomposedName = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, DecomposedName::default());
        assert!(lines[0].contains("\"hybrid\":\"unknown\""));
    }

    #[test]
    fn test_headers_cover_every_rank() {
        let headers = decomposition_headers();
        assert_eq!(headers.len(), 5 * 5 + 4 + 3);
        assert!(!headers.iter().any(|h| h == "ishybrid_genus"));
        assert_eq!(headers.last().map(String::as_str), Some("remarks"));
    }
}
