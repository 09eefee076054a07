use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_SOURCE_LANG: Language = Language::En;
pub const DEFAULT_TARGET_LANG: Language = Language::De;

/// Languages offered by the selectors. Serialized as the lowercase code the
/// translation service expects.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
    Fr,
    Es,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::De, Language::Fr, Language::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::De => "German",
            Language::Fr => "French",
            Language::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("unsupported language code: {0:?} (expected one of en, de, fr, es)")]
    Unsupported(String),
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| LanguageError::Unsupported(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("de".parse::<Language>(), Ok(Language::De));
        assert_eq!(" FR ".parse::<Language>(), Ok(Language::Fr));
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            "pt".parse::<Language>(),
            Err(LanguageError::Unsupported("pt".to_owned()))
        );
    }

    #[test]
    fn serializes_as_lowercase_code() {
        let json = serde_json::to_string(&Language::Es).expect("serialize");
        assert_eq!(json, "\"es\"");
    }
}
