use serde::Serialize;
use std::fmt;

/// Shown instead of the localized definition when the model left it out.
pub const LOCALIZED_DEFINITION_NOT_FOUND: &str = "not found";

/// Whether the model judged the input to be a single word or a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Word,
    Sentence,
}

impl Kind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Some(Self::Word),
            "sentence" => Some(Self::Sentence),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word => f.write_str("word"),
            Self::Sentence => f.write_str("sentence"),
        }
    }
}

/// The analysis extracted from one model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub kind: Kind,
    /// The input as echoed back by the model.
    pub subject: String,
    pub definition: String,
    pub examples: Vec<String>,
    /// IPA pronunciation, if the model gave one.
    pub pronunciation: Option<String>,
    /// The translated definition, or [`LOCALIZED_DEFINITION_NOT_FOUND`].
    pub localized_definition: String,
    pub synonyms: Vec<String>,
    /// Full form when the input is an acronym.
    pub acronym_expansion: Option<String>,
}

impl TranslationResult {
    /// Returns `false` when the reply lacked a localized definition.
    pub fn has_localized_definition(&self) -> bool {
        self.localized_definition != LOCALIZED_DEFINITION_NOT_FOUND
    }
}
