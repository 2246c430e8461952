use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::layout::{LayoutOptions, render_with};
use crate::parser::parse;

pub const PROMPT_FIELD: &str = "Prompt";
pub const NEGATIVE_PROMPT_FIELD: &str = "Negative prompt";

static PROMPT_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s)prompt$").expect("prompt classification pattern is valid")
});

/// One `name: value` annotation recovered from generation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Prompt-like fields span the full width instead of sharing a row.
    /// Matches "Prompt" and names ending in " prompt", but not "Promptless".
    pub fn is_prompt_like(&self) -> bool {
        PROMPT_LIKE.is_match(&self.name)
    }
}

/// The ordered field sequence produced by a single parse.
///
/// The first field is always [`PROMPT_FIELD`]. Duplicate names are kept in
/// source order; lookups by name return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationInfo {
    fields: Vec<Field>,
}

impl GenerationInfo {
    pub fn parse(raw: &str) -> Self {
        Self { fields: parse(raw) }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a parsed value, which starts with the Prompt field;
    /// only a `GenerationInfo` built from an empty `Vec` is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn prompt(&self) -> &str {
        self.fields
            .first()
            .map(|field| field.value.as_str())
            .unwrap_or_default()
    }

    pub fn negative_prompt(&self) -> Option<&str> {
        self.get(NEGATIVE_PROMPT_FIELD)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .map(|field| field.value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name.eq_ignore_ascii_case(name))
            .map(|field| field.value.as_str())
    }

    pub fn render(&self) -> String {
        self.render_with(&LayoutOptions::default())
    }

    pub fn render_with(&self, options: &LayoutOptions) -> String {
        render_with(&self.fields, options)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.fields)
    }
}

impl From<Vec<Field>> for GenerationInfo {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a GenerationInfo {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
