//! In-memory interaction state for one session.
//!
//! The controller owns the live record; callers only ever see snapshots.

use crate::language::{Language, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use serde::{Deserialize, Serialize};

/// Shown in the result area whenever a request fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Translation failed. Please try again.";
/// Shown in the result area before anything has been translated.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "No translation yet";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub input_text: String,
    pub source_lang: Language,
    pub target_lang: Language,
    /// Last successful result or [`FAILURE_MESSAGE`].
    pub translated_text: Option<String>,
    pub is_busy: bool,
}

impl SessionState {
    pub fn new(source_lang: Language, target_lang: Language) -> Self {
        Self {
            input_text: String::new(),
            source_lang,
            target_lang,
            translated_text: None,
            is_busy: false,
        }
    }

    pub fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    pub fn has_result(&self) -> bool {
        self.translated_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy && self.has_input()
    }

    pub fn can_clear(&self) -> bool {
        self.has_input()
    }

    pub fn can_copy(&self) -> bool {
        self.has_result()
    }

    pub fn display_text(&self) -> &str {
        match self.translated_text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => EMPTY_RESULT_PLACEHOLDER,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_gates_every_trigger() {
        let s = SessionState::default();
        assert!(!s.can_submit());
        assert!(!s.can_clear());
        assert!(!s.can_copy());
        assert_eq!(s.display_text(), EMPTY_RESULT_PLACEHOLDER);
        assert_eq!((s.source_lang, s.target_lang), (Language::En, Language::De));
    }

    #[test]
    fn whitespace_input_is_not_submittable() {
        let s = SessionState {
            input_text: " \t\n ".into(),
            ..Default::default()
        };
        assert!(!s.can_submit());
        assert!(!s.can_clear());
    }

    #[test]
    fn busy_blocks_submit_but_not_clear() {
        let s = SessionState {
            input_text: "Hello".into(),
            is_busy: true,
            ..Default::default()
        };
        assert!(!s.can_submit());
        assert!(s.can_clear());
    }

    #[test]
    fn empty_result_counts_as_absent() {
        let s = SessionState {
            translated_text: Some(String::new()),
            ..Default::default()
        };
        assert!(!s.can_copy());
        assert_eq!(s.display_text(), EMPTY_RESULT_PLACEHOLDER);
    }
}
