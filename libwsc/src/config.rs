use std::{collections::HashSet, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    corpus::{FileSelection, TokenFormat},
    error::{Error, Result},
    frequency::{CorpusProvider, FileProvider, FrequencyProvider},
};

/// Where the counts of a source come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceKind {
    /// Installed corpus, counted at run time
    Corpus {
        #[serde(default)]
        format: TokenFormat,
        /// Subdirectories holding the text, all of the corpus when empty
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        include: Vec<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extension: Option<String>,
    },
    /// Pre-computed `word count` list
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: SourceKind,
}

impl SourceConfig {
    pub fn corpus(name: &str, format: TokenFormat) -> Self {
        Self::corpus_files(name, format, &[], None)
    }

    /// A corpus read only from the `include` subdirectories and, when
    /// given, only from files ending in `extension`.
    pub fn corpus_files(
        name: &str,
        format: TokenFormat,
        include: &[&str],
        extension: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind: SourceKind::Corpus {
                format,
                include: include.iter().map(PathBuf::from).collect(),
                extension: extension.map(str::to_string),
            },
        }
    }

    pub fn file(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            kind: SourceKind::File { path: path.into() },
        }
    }

    pub fn provider(&self, corpus_root: &Path) -> Box<dyn FrequencyProvider> {
        match &self.kind {
            SourceKind::Corpus {
                format,
                include,
                extension,
            } => Box::new(CorpusProvider::new(
                corpus_root,
                &self.name,
                *format,
                FileSelection {
                    include: include.clone(),
                    extension: extension.clone(),
                },
            )),
            SourceKind::File { path } => Box::new(FileProvider::new(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub word_list: PathBuf,
    pub output_dir: PathBuf,
    pub corpus_root: PathBuf,
    /// Log and skip a failing source instead of aborting the run
    pub isolate_failures: bool,
    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: "Nouns.txt".into(),
            output_dir: "noun_scores".into(),
            corpus_root: "nltk_data/corpora".into(),
            isolate_failures: false,
            sources: vec![
                SourceConfig::corpus("brown", TokenFormat::Tagged),
                SourceConfig::corpus_files(
                    "reuters",
                    TokenFormat::Plain,
                    &["training", "test"],
                    None,
                ),
                SourceConfig::corpus_files(
                    "treebank",
                    TokenFormat::Parsed,
                    &["combined"],
                    Some("mrg"),
                ),
                SourceConfig::corpus_files("gutenberg", TokenFormat::Plain, &[], Some("txt")),
                SourceConfig::file("wiki-gut", "freq_list/combined_wordfreq.txt"),
                SourceConfig::file("wiki", "freq_list/wikipedia_wordfreq.txt"),
            ],
        }
    }
}

impl Config {
    /// Reads a JSON config; fields left out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("no sources configured".into()));
        }
        let mut seen = HashSet::new();
        for source in &self.sources {
            let name = source.name.as_str();
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(Error::Config(format!("invalid source name {:?}", name)));
            }
            if !seen.insert(name) {
                return Err(Error::Config(format!("duplicate source {:?}", name)));
            }
        }
        Ok(())
    }
}
