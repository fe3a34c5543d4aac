use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Text that is either given verbatim or as a per-language mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translatable {
    Text(String),
    Translated(BTreeMap<String, String>),
}

impl Translatable {
    /// Resolve the text for `language`, falling back to english for mappings.
    pub fn resolve(&self, language: &str) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Translated(map) => map
                .get(language)
                .or_else(|| map.get(DEFAULT_LANGUAGE))
                .map(String::as_str),
        }
    }

    /// An empty plain string counts as no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Translated(_) => false,
        }
    }
}

impl From<&str> for Translatable {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Translatable {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Resolve an optional translatable, treating empty results as absent.
pub fn resolve_text<'a>(text: Option<&'a Translatable>, language: &str) -> Option<&'a str> {
    text.and_then(|t| t.resolve(language))
        .filter(|resolved| !resolved.is_empty())
}
