use crate::sql::{
    keyword::{FUNCTIONS, RESERVED},
    parser::SELECT_MODIFIERS,
};
use itertools::Itertools;

/// Characters that end the word being typed.
pub const SEPARATORS: &[char] = &[
    ' ', '\t', '\n', '.', ';', ',', '\'', '"', '`', '#', '(', ')', '[', ']', '/', '=', '<', '>',
    '\\', '|', '+', '-', '%', '*',
];

/// Character sets offered after `SET NAMES` and `CHARACTER SET`.
pub const CHARSETS: &[&str] = &[
    "utf8mb4", "utf8mb3", "utf8", "latin1", "ascii", "binary", "ucs2", "utf16", "utf16le",
    "utf32", "cp1250", "cp1251", "cp1256", "cp1257", "cp850", "cp852", "cp866", "cp932",
    "big5", "gb2312", "gb18030", "gbk", "sjis", "ujis", "euckr", "eucjpms", "koi8r", "koi8u",
    "greek", "hebrew", "latin2", "latin5", "latin7", "macce", "macroman", "swe7", "tis620",
    "armscii8", "dec8", "geostd8", "hp8", "keybcs2",
];

/// Words that may start a `SET` item besides a variable name.
pub const SET_WORDS: &[&str] = &[
    "GLOBAL", "SESSION", "LOCAL", "PERSIST", "PERSIST_ONLY", "NAMES", "CHARSET",
];

/// The word being typed at the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefix {
    /// Typed text between the last separator and the cursor.
    pub text: String,
    /// Byte offset where `text` starts.
    pub start: usize,
    /// Cursor offset clamped to the input and to a character boundary.
    pub cursor: usize,
    /// Dotted name directly preceding `text`, unquoted: `a` in `a.fir`, `db.t` in
    /// `db.t.c`.
    pub qualifier: Option<String>,
    /// Start of the whole dotted word, the qualifier included.
    pub word_start: usize,
}

impl Prefix {
    pub fn at(text: &str, cursor: usize) -> Self {
        let mut cursor = cursor.min(text.len());
        while !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let start = word_start(&text[..cursor]);
        let mut prefix = Self {
            text: text[start..cursor].to_string(),
            start,
            cursor,
            qualifier: None,
            word_start: start,
        };
        let mut parts = Vec::new();
        let mut rest = &text[..start];
        while let Some(before) = rest.strip_suffix('.') {
            let (part, part_start) = match before.strip_suffix('`') {
                Some(quoted) => match quoted.rfind('`') {
                    Some(open) => (&quoted[open + 1..], open),
                    None => break,
                },
                None => {
                    let start = word_start(before);
                    (&before[start..], start)
                }
            };
            if part.is_empty() {
                break;
            }
            parts.push(part);
            prefix.word_start = part_start;
            rest = &text[..part_start];
        }
        if !parts.is_empty() {
            parts.reverse();
            prefix.qualifier = Some(parts.join("."));
        }
        prefix
    }

    /// Offset of the typed word for excluding it from the harvested names.
    pub fn skip(&self) -> Option<usize> {
        (!self.text.is_empty() || self.qualifier.is_some()).then_some(self.word_start)
    }
}

fn word_start(text: &str) -> usize {
    text.rfind(SEPARATORS).map_or(0, |i| i + 1)
}

pub fn matches(candidate: &str, prefix: &str) -> bool {
    candidate.len() >= prefix.len()
        && candidate.is_char_boundary(prefix.len())
        && candidate[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Recase `candidate` after `prefix`: all upper or all lower prefixes are copied,
/// anything else leaves the candidate alone.
pub fn echo_case(candidate: &str, prefix: &str) -> String {
    let mut letters = prefix.chars().filter(|c| c.is_alphabetic()).peekable();
    if letters.peek().is_none() {
        return candidate.to_string();
    }
    let letters: Vec<char> = letters.collect();
    if letters.iter().all(|c| c.is_uppercase()) {
        candidate.to_uppercase()
    } else if letters.iter().all(|c| c.is_lowercase()) {
        candidate.to_lowercase()
    } else {
        candidate.to_string()
    }
}

/// Candidates from every source, in order, that match `prefix`, recased and without
/// repeats.
pub fn select<I, S>(prefix: &str, sources: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flatten()
        .filter(|candidate| matches(candidate.as_ref(), prefix))
        .map(|candidate| echo_case(candidate.as_ref(), prefix))
        .unique()
        .collect()
}

/// The reserved word pool, uppercased.
pub fn keywords() -> Vec<String> {
    RESERVED.iter().map(|k| k.to_ascii_uppercase()).collect()
}

pub fn functions() -> Vec<String> {
    FUNCTIONS.iter().map(|f| f.to_ascii_uppercase()).collect()
}

pub fn select_modifiers() -> Vec<String> {
    SELECT_MODIFIERS
        .iter()
        .map(|m| m.to_ascii_uppercase())
        .collect()
}

pub fn charsets() -> Vec<String> {
    CHARSETS.iter().map(|c| c.to_string()).collect()
}
