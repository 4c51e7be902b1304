use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

use crate::config::ConfigError;

const INVALID_FILE_EXT_CHARS: [char; 2] = ['/', '.'];

/// A language the user can pick in the editor
///
/// Parsed from and displayed as the UI key (`java`, `python`, `c_cpp`,
/// `javascript`), which is also the editor's syntax mode identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Java,
    Python,
    CCpp,
    Javascript,
}

impl Language {
    /// Every selectable language, in menu order
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::Python,
        Language::CCpp,
        Language::Javascript,
    ];

    /// The UI key for this language
    pub fn key(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::CCpp => "c_cpp",
            Language::Javascript => "javascript",
        }
    }

    /// Human-readable name shown in language pickers
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Python => "Python",
            Language::CCpp => "C++",
            Language::Javascript => "JavaScript",
        }
    }

    /// Syntax mode identifier handed to the editor widget
    pub fn editor_mode(self) -> &'static str {
        self.key()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Language::Java => 0,
            Language::Python => 1,
            Language::CCpp => 2,
            Language::Javascript => 3,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A language key that is not one of the supported languages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language '{0}' (expected one of: java, python, c_cpp, javascript)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.key() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"one of: java, python, c_cpp, javascript",
            )
        })
    }
}

/// File extension without dot (e.g., "py")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtension(String);

impl FileExtension {
    pub fn new(extension: &str) -> Result<Self, ConfigError> {
        let contains_invalid = extension
            .chars()
            .any(|c| INVALID_FILE_EXT_CHARS.contains(&c));
        if contains_invalid {
            return Err(ConfigError::InvalidFileExtChars);
        }
        Ok(Self(extension.to_owned()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FileExtension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileExtension::new(&s).map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"a file extension without '/' or '.' characters",
            )
        })
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How one language is presented to the execution service and the file system
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageMapping {
    /// Language token expected by the remote execution service (e.g., "py")
    pub token: String,

    /// Extension used when saving source files
    pub extension: FileExtension,
}

impl LanguageMapping {
    pub fn new(token: &str, extension: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            token: token.to_owned(),
            extension: FileExtension::new(extension)?,
        })
    }

    /// Built-in mapping for a language
    pub(crate) fn builtin(language: Language) -> Self {
        let (token, extension) = match language {
            Language::Java => ("java", "java"),
            Language::Python => ("py", "py"),
            Language::CCpp => ("cpp", "cpp"),
            Language::Javascript => ("js", "js"),
        };
        Self {
            token: token.to_owned(),
            extension: FileExtension(extension.to_owned()),
        }
    }

    /// MIME type used when handing a saved file to the downloader
    pub fn mime_type(&self) -> String {
        format!("text/{}", self.extension)
    }
}
