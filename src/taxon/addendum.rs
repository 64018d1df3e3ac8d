/// Phrases moved from free-text notes into the addendum, in priority order.
const ADDENDUM_PHRASES: [&str; 2] = ["sensu lato", "sensu stricto"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Addendum {
    pub addendum: String,
    pub remarks: String,
}

/// Takes the first known addendum phrase out of `notes`; every occurrence of
/// every phrase is removed from the remarks.
pub fn extract_addendum(notes: &str) -> Addendum {
    let addendum = ADDENDUM_PHRASES
        .iter()
        .find(|phrase| notes.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .unwrap_or_default();

    let mut remarks = notes.to_string();
    for phrase in ADDENDUM_PHRASES {
        remarks = remarks.replace(phrase, "");
    }

    Addendum {
        addendum,
        remarks: remarks.trim().to_string(),
    }
}
