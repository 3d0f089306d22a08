pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod output;
pub mod pipeline;
pub mod scorer;
pub mod util;
pub mod word_list;

pub use config::{Config, SourceConfig, SourceKind};
pub use corpus::{FileSelection, TokenFormat};
pub use error::{Error, Result};
pub use frequency::{FrequencyProvider, FrequencyTable};
pub use pipeline::{ScoreCompiler, SourceOutcome, SourceReport};
pub use scorer::{ScoredWord, Scoring};

/// Runs the whole scoring pass described by `config`.
pub fn compile_scores(config: Config) -> Result<Vec<SourceReport>> {
    ScoreCompiler::new(config).compile()
}
