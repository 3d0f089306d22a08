use std::{fs::OpenOptions, io::Read, path::Path};

use bzip2::read::BzDecoder;

use crate::error::{Error, Result};

/// Reads a whole text file, decompressing it first when it ends in `.bz2`.
/// Invalid UTF-8 sequences are replaced, not rejected.
pub fn read_file(filename: impl AsRef<Path>) -> Result<String> {
    let filename = filename.as_ref();
    let mut bytes = Vec::new();
    let mut file = OpenOptions::new()
        .read(true)
        .open(filename)
        .map_err(|e| Error::io(filename, e))?;
    if is_bzip2(filename) {
        BzDecoder::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(filename, e))?;
    } else {
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::io(filename, e))?;
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn is_bzip2(path: &Path) -> bool {
    path.extension()
        .map(|s| s.to_string_lossy().as_ref() == "bz2")
        .unwrap_or_default()
}

/// Splits text into word and punctuation tokens.
///
/// Runs of alphanumeric characters (and `_`) form one token, runs of any
/// other non-whitespace characters form another.
pub fn tokenize_plain(text: &str) -> Vec<&str> {
    #[derive(PartialEq, Clone, Copy)]
    enum Class {
        Word,
        Punct,
    }

    fn classify(c: char) -> Option<Class> {
        match c {
            c if c.is_whitespace() => None,
            c if c.is_alphanumeric() || c == '_' => Some(Class::Word),
            _ => Some(Class::Punct),
        }
    }

    let mut tokens = Vec::new();
    let mut start: Option<(usize, Class)> = None;
    for (index, c) in text.char_indices() {
        let class = classify(c);
        match (start, class) {
            (Some((_, current)), Some(next)) if current == next => {}
            (Some((begin, _)), next) => {
                tokens.push(&text[begin..index]);
                start = next.map(|class| (index, class));
            }
            (None, next) => start = next.map(|class| (index, class)),
        }
    }
    if let Some((begin, _)) = start {
        tokens.push(&text[begin..]);
    }
    tokens
}

/// Splits whitespace separated `word/TAG` tokens and keeps the word part.
pub fn tokenize_tagged(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| match token.rfind('/') {
            Some(index) if index > 0 => &token[..index],
            _ => token,
        })
        .collect()
}

/// Keeps the leaf words of bracketed parse trees such as
/// `(NP-SBJ (NNP Pierre) (NNP Vinken))`.
///
/// A leaf is an atom that directly follows another atom, the node label
/// always being the first atom after an opening bracket.
pub fn tokenize_parsed(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut previous_was_atom = false;
    let mut atom_start: Option<usize> = None;
    for (index, c) in text.char_indices() {
        let is_atom_char = !c.is_whitespace() && c != '(' && c != ')';
        match (atom_start, is_atom_char) {
            (None, true) => atom_start = Some(index),
            (Some(begin), false) => {
                if previous_was_atom {
                    tokens.push(&text[begin..index]);
                }
                previous_was_atom = true;
                atom_start = None;
            }
            _ => {}
        }
        if c == '(' || c == ')' {
            previous_was_atom = false;
        }
    }
    if let (Some(begin), true) = (atom_start, previous_was_atom) {
        tokens.push(&text[begin..]);
    }
    tokens
}
