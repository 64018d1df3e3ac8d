use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static HYBRID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[x×]\s|\s[x×]\s").expect("valid hybrid regex"));

/// Hybrid status of one rank's epithet. `Unknown` means the rank is not
/// populated for the record, which is not the same as a known non-hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HybridFlag {
    True,
    False,
    #[default]
    Unknown,
}

impl HybridFlag {
    /// Tabular rendering: `True`, `False` or blank.
    pub fn as_cell(self) -> &'static str {
        match self {
            HybridFlag::True => "True",
            HybridFlag::False => "False",
            HybridFlag::Unknown => "",
        }
    }
}

impl fmt::Display for HybridFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}

/// Classifies a stored epithet string.
pub fn assign_hybrid_flag(epithet: &str) -> HybridFlag {
    if epithet.trim().is_empty() {
        HybridFlag::Unknown
    } else if HYBRID_REGEX.is_match(epithet) {
        HybridFlag::True
    } else {
        HybridFlag::False
    }
}
