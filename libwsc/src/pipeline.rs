use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, error};

use crate::{
    config::{Config, SourceConfig},
    error::{Error, Result},
    output::{self, SummaryWriter, SUMMARY_FILE_NAME},
    scorer, word_list,
};

const SEPARATOR: &str = "-------------------------------";

/// What happened to one source during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Scored {
        total: usize,
        nonzero: usize,
        output: PathBuf,
    },
    /// Only produced when failures are isolated
    Skipped { reason: String },
}

#[derive(Debug)]
pub struct ScoreCompiler {
    config: Config,
}

impl ScoreCompiler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scores the word list against every configured source in order,
    /// recreating the output directory first.
    pub fn compile(&self) -> Result<Vec<SourceReport>> {
        self.config.validate()?;

        let words = word_list::load_word_list(&self.config.word_list)?;
        println!("Nouns loaded, quantity = {}", words.len());
        println!("{}", SEPARATOR);

        recreate_dir(&self.config.output_dir)?;
        let mut summary = SummaryWriter::create(&self.config.output_dir)?;

        let mut reports = Vec::with_capacity(self.config.sources.len());
        for source in &self.config.sources {
            println!("SOURCE: {}", source.name);
            let outcome = match self.process_source(source, &words, &mut summary) {
                Ok(outcome) => outcome,
                Err(e) if self.config.isolate_failures => {
                    error!("source {} failed: {}", source.name, e);
                    summary.append(&format!("{} corpora, skipped: {}", source.name, e))?;
                    SourceOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            println!("{}", SEPARATOR);
            reports.push(SourceReport {
                source: source.name.clone(),
                outcome,
            });
        }

        summary.finish()?;
        println!("Summary file written to {}", SUMMARY_FILE_NAME);
        Ok(reports)
    }
}

// Helper methods
impl ScoreCompiler {
    fn process_source(
        &self,
        source: &SourceConfig,
        words: &[String],
        summary: &mut SummaryWriter,
    ) -> Result<SourceOutcome> {
        let table = source
            .provider(&self.config.corpus_root)
            .frequency_table()?;
        println!("Dictionary created");
        debug!("{} table holds {} words", source.name, table.len());

        let mut scoring = scorer::score_words(&source.name, words, &table);
        drop(table);
        let message = scoring.summary();
        println!("Nouns scored");
        println!("{}", message);

        scorer::sort_by_score(&mut scoring.entries);
        println!("Nouns sorted by score");

        let output =
            output::write_scored_file(&self.config.output_dir, &source.name, &scoring.entries)?;
        println!("Score file written");
        summary.append(&message)?;

        Ok(SourceOutcome::Scored {
            total: scoring.total(),
            nonzero: scoring.nonzero,
            output,
        })
    }
}

/// Removes `dir` with everything in it, then creates it empty.
/// A directory that does not exist yet is fine, any other failure is not.
pub fn recreate_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!("removed previous {}", dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(Error::OutputDirectory {
                path: dir.to_path_buf(),
                source,
            })
        }
    }
    std::fs::create_dir_all(dir).map_err(|source| Error::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
