//! Identification qualifiers (`cf.`, `aff.`, `sp.`) embedded in a name.
use once_cell::sync::Lazy;
use regex::Regex;

static QUALIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:cf|aff|sp)\b").expect("valid qualifier regex"));

static REPEATED_SPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualified {
    /// Qualifier as written, including its period (`cf.`, `CF`). Empty if none.
    pub qualifier: String,
    /// Name with the qualifier removed and whitespace collapsed.
    pub name: String,
}

/// Pulls the first qualifier out of `full_name`.
///
/// A qualifier must be followed by whitespace, the end of the string, a
/// comma or a period. Only the first match is removed.
pub fn extract_qualifier(full_name: &str) -> Qualified {
    for found in QUALIFIER_REGEX.find_iter(full_name) {
        let rest = &full_name[found.end()..];
        let Some(qualifier_end) = qualifier_end(rest) else {
            continue;
        };
        let end = found.end() + qualifier_end;
        let tail = full_name[end..].trim_start();
        let joined = format!("{}{}", &full_name[..found.start()], tail);
        return Qualified {
            qualifier: full_name[found.start()..end].to_string(),
            name: collapse_whitespace(&joined),
        };
    }

    Qualified {
        qualifier: String::new(),
        name: collapse_whitespace(full_name),
    }
}

/// Length of the optional period to include, or `None` when the word is not
/// followed by an acceptable terminator.
fn qualifier_end(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    match chars.next() {
        None => Some(0),
        Some('.') => match chars.next() {
            None => Some(1),
            Some(c) if is_terminator(c) => Some(1),
            // "cf.x": the period itself terminates a bare "cf".
            Some(_) => Some(0),
        },
        Some(c) if is_terminator(c) => Some(0),
        Some(_) => None,
    }
}

fn is_terminator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '.'
}

fn collapse_whitespace(value: &str) -> String {
    REPEATED_SPACE_REGEX.replace_all(value, " ").trim().to_string()
}
