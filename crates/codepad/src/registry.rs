//! Language registry
//!
//! Maps each selectable [`Language`] to the token the execution service
//! expects and the extension used for saved files. Every language always has
//! exactly one mapping, so lookups cannot fail.

use std::collections::HashMap;

use crate::config::{FileExtension, Language, LanguageMapping};

/// Total mapping from [`Language`] to [`LanguageMapping`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    mappings: [LanguageMapping; 4],
}

impl LanguageRegistry {
    /// Registry with the built-in mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in mappings, replacing the entries present in `overrides`
    pub fn with_overrides(overrides: &HashMap<Language, LanguageMapping>) -> Self {
        let mut registry = Self::default();
        for (language, mapping) in overrides {
            registry.mappings[language.index()] = mapping.clone();
        }
        registry
    }

    /// Mapping for a language
    pub fn lookup(&self, language: Language) -> &LanguageMapping {
        &self.mappings[language.index()]
    }

    pub fn token_of(&self, language: Language) -> &str {
        &self.lookup(language).token
    }

    pub fn extension_of(&self, language: Language) -> &FileExtension {
        &self.lookup(language).extension
    }

    /// All mappings in menu order
    pub fn iter(&self) -> impl Iterator<Item = (Language, &LanguageMapping)> {
        Language::ALL
            .into_iter()
            .map(move |language| (language, self.lookup(language)))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self {
            mappings: Language::ALL.map(LanguageMapping::builtin),
        }
    }
}
