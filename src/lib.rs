pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod taxon;

pub use error::{CrateError, Result};
pub use taxon::{DecomposedName, Decomposer, DecomposerConfig, HybridFlag, Rank, RankCode, RawName};
