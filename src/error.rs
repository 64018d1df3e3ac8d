use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required CSV header: {0}")]
    MissingHeader(String),

    #[error("Invalid rank code '{value}' at row {row}")]
    InvalidRankCode { value: String, row: usize },

    #[error("Missing rank code for {} record(s) at row(s): {}", .rows.len(), join_rows(.rows))]
    MissingRankCodes { rows: Vec<usize> },

    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
}

fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|row| row.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rank_codes_lists_every_row() {
        let err = CrateError::MissingRankCodes {
            rows: vec![2, 5, 9],
        };
        assert_eq!(
            err.to_string(),
            "Missing rank code for 3 record(s) at row(s): 2, 5, 9"
        );
    }
}
