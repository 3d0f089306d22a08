use std::{
    collections::HashMap,
    fs::OpenOptions,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    corpus::{Corpus, FileSelection, TokenFormat},
    error::{Error, Result},
};

/// Word counts for a single source. Lookups never fail, unseen words count 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or_default()
    }

    /// Sets the count for `word`, replacing any earlier value.
    pub fn insert(&mut self, word: impl Into<String>, count: u64) {
        self.counts.insert(word.into(), count);
    }

    pub fn increment(&mut self, word: impl Into<String>) {
        *self.counts.entry(word.into()).or_default() += 1;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (word, count) in iter {
            table.insert(word, count);
        }
        table
    }
}

/// Anything able to produce the frequency table of one source.
pub trait FrequencyProvider {
    fn frequency_table(&self) -> Result<FrequencyTable>;
}

/// Counts the tokens of an installed corpus.
#[derive(Debug, Clone)]
pub struct CorpusProvider {
    root: PathBuf,
    name: String,
    format: TokenFormat,
    selection: FileSelection,
}

impl CorpusProvider {
    pub fn new(
        root: impl Into<PathBuf>,
        name: impl Into<String>,
        format: TokenFormat,
        selection: FileSelection,
    ) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            format,
            selection,
        }
    }
}

impl FrequencyProvider for CorpusProvider {
    fn frequency_table(&self) -> Result<FrequencyTable> {
        Corpus::open(&self.root, &self.name, self.format, &self.selection)?.frequency_table()
    }
}

/// Reads a pre-computed `word count` frequency list.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrequencyProvider for FileProvider {
    fn frequency_table(&self) -> Result<FrequencyTable> {
        let file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;
        let table =
            parse_frequency_list(BufReader::new(file)).map_err(|e| Error::io(&self.path, e))?;
        debug!(
            "{} yielded {} distinct words",
            self.path.display(),
            table.len()
        );
        Ok(table)
    }
}

/// Parses `word count` lines into a table.
///
/// Lines of three bytes or fewer (line break included) are ignored. A
/// missing count means 0, an unparsable one is logged and also means 0.
/// Repeated words keep the last value seen. Invalid UTF-8 is replaced
/// instead of failing the whole list.
pub fn parse_frequency_list(mut reader: impl BufRead) -> std::io::Result<FrequencyTable> {
    const MIN_LINE_LEN: usize = 3;

    let mut table = FrequencyTable::new();
    let mut bytes = Vec::new();
    loop {
        bytes.clear();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        if bytes.len() <= MIN_LINE_LEN {
            continue;
        }
        let line = String::from_utf8_lossy(&bytes);
        let fields = line.split_whitespace().collect::<Vec<_>>();
        let count = match fields[..] {
            [] => continue,
            [_] => 0,
            [_, count] => count.parse::<u64>().unwrap_or_else(|_| {
                warn!("non integer score, line: {:?}", line.trim_end());
                0
            }),
            _ => {
                warn!("unexpected extra fields, line: {:?}", line.trim_end());
                0
            }
        };
        table.insert(fields[0], count);
    }
    Ok(table)
}
