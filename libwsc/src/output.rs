use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    scorer::ScoredWord,
};

pub const SUMMARY_FILE_NAME: &str = "0_SUMMARY.txt";

pub fn scored_file_path(dir: impl AsRef<Path>, source: &str) -> PathBuf {
    dir.as_ref().join(format!("{}_scored.txt", source))
}

/// Writes `entries` in the given order as `<word>   <score>` lines,
/// replacing any previous file for this source.
pub fn write_scored_file(
    dir: impl AsRef<Path>,
    source: &str,
    entries: &[ScoredWord],
) -> Result<PathBuf> {
    let filename = scored_file_path(dir, source);
    let write = || -> std::io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&filename)?;
        let mut writer = BufWriter::new(file);
        for entry in entries {
            writeln!(writer, "{}   {}", entry.word, entry.score)?;
        }
        writer.flush()
    };
    write().map_err(|e| Error::io(&filename, e))?;
    Ok(filename)
}

/// The run summary, one line per source in processing order.
#[derive(Debug)]
pub struct SummaryWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl SummaryWriter {
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(SUMMARY_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| Error::io(&self.path, e))
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .map_err(|e| Error::io(&self.path, e))?;
        Ok(self.path)
    }
}
