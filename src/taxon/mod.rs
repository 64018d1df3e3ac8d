//! Decomposition of free-text scientific names into rank fields.
pub mod addendum;
pub mod config;
pub mod decomposer;
pub mod epithet;
pub mod hybrid;
pub mod metadata;
pub mod normalizer;
pub mod qualifier;
pub mod rank;
pub mod segmenter;
pub mod zone;

pub use config::DecomposerConfig;
pub use decomposer::{DecomposedName, Decomposer, RankField, RawName};
pub use hybrid::HybridFlag;
pub use rank::{Rank, RankCode};
