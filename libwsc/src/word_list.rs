use std::{
    fs::OpenOptions,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::{Error, Result};

/// Loads the candidate words from `filename`, one per line.
///
/// Only lines made of lowercase ASCII letters survive, so proper nouns,
/// numbers and punctuated entries are dropped. Order and duplicates are kept.
pub fn load_word_list(filename: impl AsRef<Path>) -> Result<Vec<String>> {
    let filename = filename.as_ref();
    let file = OpenOptions::new()
        .read(true)
        .open(filename)
        .map_err(|e| Error::io(filename, e))?;
    parse_word_list(BufReader::new(file)).map_err(|e| Error::io(filename, e))
}

/// Same filtering as [`load_word_list`] over any reader. Lines that are not
/// valid UTF-8 are decoded lossily and then fail the filter on their own.
pub fn parse_word_list(mut reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut bytes = Vec::new();
    loop {
        bytes.clear();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&bytes);
        let word = line.trim();
        if word_qualifies(word) {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

pub fn word_qualifies(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}
