use crate::common::error::{EtlError, Result};
use crate::pipeline::table::{json_kind, ProductTable};
use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde_json::Value;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub const TOKENIZE_SUFFIX: &str = "_tokenize";
pub const STEM_SUFFIX: &str = "_stemm";

/// English stopword set, built once per process and shared read-only.
static STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let raw = include_str!("../../stopwords_en.json");
    serde_json::from_str::<Vec<String>>(raw)
        .expect("valid stopword list")
        .into_iter()
        .collect()
});

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Split on Unicode word boundaries, keep only all-alphabetic units (numerals,
/// punctuation and mixed tokens drop out), lowercase, and remove stopwords.
/// Order is preserved; duplicates within the text are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|word| word.chars().all(char::is_alphabetic))
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(word))
        .collect()
}

/// Run the same filter pipeline as [`tokenize`] on the raw text, then
/// suffix-strip each token and join with single spaces.
pub fn stem(text: &str) -> String {
    tokenize(text)
        .iter()
        .map(|word| STEMMER.stem(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append `{column}_tokenize` (word list) and `{column}_stemm` (space-joined
/// stems) derived from a designated text column. A missing or non-string cell
/// fails the whole derivation.
pub fn add_text_features(table: &mut ProductTable, column: &str) -> Result<()> {
    let tokenized = format!("{}{}", column, TOKENIZE_SUFFIX);
    table.derive_column(column, &tokenized, |row, cell| {
        let text = expect_text(column, row, cell)?;
        Ok(Value::Array(tokenize(text).into_iter().map(Value::String).collect()))
    })?;

    let stemmed = format!("{}{}", column, STEM_SUFFIX);
    table.derive_column(column, &stemmed, |row, cell| {
        let text = expect_text(column, row, cell)?;
        Ok(Value::String(stem(text)))
    })
}

fn expect_text<'a>(column: &str, row: usize, cell: &'a Value) -> Result<&'a str> {
    cell.as_str().ok_or_else(|| {
        EtlError::TextProcessing(format!(
            "column '{}' row {} holds {} where a string is required",
            column,
            row,
            json_kind(cell)
        ))
    })
}
