use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    util, FrequencyTable,
};

/// How the text of a corpus is split into tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// Words and punctuation runs
    #[default]
    Plain,
    /// Whitespace separated `word/TAG` pairs
    Tagged,
    /// Bracketed parse trees, only the leaves are words
    Parsed,
}

impl TokenFormat {
    pub fn tokenize(self, text: &str) -> Vec<&str> {
        match self {
            TokenFormat::Plain => util::tokenize_plain(text),
            TokenFormat::Tagged => util::tokenize_tagged(text),
            TokenFormat::Parsed => util::tokenize_parsed(text),
        }
    }
}

/// Which files of a corpus directory hold its text.
///
/// Installed corpora often ship the same sentences in several renderings
/// (`combined/`, `tagged/`, `raw/`), so only one of them may be counted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileSelection {
    /// Subdirectories to read, the whole corpus directory when empty
    pub include: Vec<PathBuf>,
    /// Required file extension, ignoring a trailing `.bz2`
    pub extension: Option<String>,
}

impl FileSelection {
    fn accepts(&self, file_name: &str) -> bool {
        if is_metadata(file_name) {
            return false;
        }
        match &self.extension {
            Some(extension) => {
                let name = file_name.strip_suffix(".bz2").unwrap_or(file_name);
                name.rsplit_once('.')
                    .map(|(_, found)| found == extension.as_str())
                    .unwrap_or_default()
            }
            None => true,
        }
    }
}

/// An installed corpus, resolved to the files that make up its text.
#[derive(Debug)]
pub struct Corpus {
    name: String,
    files: Vec<PathBuf>,
    format: TokenFormat,
}

impl Corpus {
    /// Resolves `name` under `root`, failing with [`Error::UnknownSource`]
    /// when no such corpus is installed or none of its files are selected.
    pub fn open(
        root: impl AsRef<Path>,
        name: &str,
        format: TokenFormat,
        selection: &FileSelection,
    ) -> Result<Self> {
        let dir = root.as_ref().join(name);
        if !dir.is_dir() {
            return Err(Error::UnknownSource(name.to_string()));
        }
        let roots = if selection.include.is_empty() {
            vec![dir]
        } else {
            selection.include.iter().map(|sub| dir.join(sub)).collect()
        };
        let files = roots
            .iter()
            .flat_map(|root| WalkDir::new(root).sort_by_file_name())
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| selection.accepts(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>();
        if files.is_empty() {
            return Err(Error::UnknownSource(name.to_string()));
        }
        debug!("corpus {} resolved to {} files", name, files.len());
        Ok(Self {
            name: name.to_string(),
            files,
            format,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Counts every token of the corpus, case folded to lowercase.
    pub fn frequency_table(&self) -> Result<FrequencyTable> {
        let mut table = FrequencyTable::new();
        for file in &self.files {
            let text = util::read_file(file)?;
            for token in self.format.tokenize(&text) {
                table.increment(token.to_lowercase());
            }
        }
        debug!("corpus {} counted {} distinct tokens", self.name, table.len());
        Ok(table)
    }
}

fn is_metadata(file_name: &str) -> bool {
    const PREFIXES: [&str; 5] = ["README", "LICENSE", "CONTENTS", "fileids", "cats."];
    file_name.starts_with('.') || PREFIXES.iter().any(|prefix| file_name.starts_with(prefix))
}
