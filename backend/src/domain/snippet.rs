//! Generation request primitives.
//!
//! A [`GenerationRequest`] is valid by construction: handlers validate the
//! raw payload into [`CodeSnippet`] and [`LanguageTag`] before the
//! orchestrator ever sees it, so an accepted request can never trigger a
//! backend call with missing fields.

use std::fmt;

/// Upper bound on submitted code, in characters.
///
/// Requests beyond this are rejected before the backend is contacted; the
/// generation call is billed per invocation and oversized snippets are
/// almost always paste mistakes.
pub const MAX_CODE_CHARS: usize = 10_000;

/// Validation errors returned by the snippet constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetValidationError {
    /// Code was missing or blank once trimmed.
    EmptyCode,
    /// Code exceeded [`MAX_CODE_CHARS`].
    CodeTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// Language tag was missing or blank once trimmed.
    EmptyLanguage,
}

impl fmt::Display for SnippetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "code must not be empty"),
            Self::CodeTooLong { max } => {
                write!(f, "code must be at most {max} characters")
            }
            Self::EmptyLanguage => write!(f, "language must not be empty"),
        }
    }
}

impl std::error::Error for SnippetValidationError {}

/// Source text submitted for documentation.
///
/// ## Invariants
/// - Non-empty after trimming; the stored text keeps the caller's original
///   whitespace so the archived copy matches what was submitted.
/// - At most [`MAX_CODE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet(String);

impl CodeSnippet {
    /// Validate and construct a snippet from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, SnippetValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SnippetValidationError::EmptyCode);
        }
        if raw.chars().count() > MAX_CODE_CHARS {
            return Err(SnippetValidationError::CodeTooLong {
                max: MAX_CODE_CHARS,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the source text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CodeSnippet {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Source-language tag accompanying a snippet.
///
/// Unknown tags are accepted and forwarded unchanged; the generation
/// backend, not this layer, is authoritative on supported languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Validate and construct a tag from raw input, trimming whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SnippetValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SnippetValidationError::EmptyLanguage);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the tag.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated generation request forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    code: CodeSnippet,
    language: LanguageTag,
}

impl GenerationRequest {
    /// Bundle a validated snippet and language tag.
    pub fn new(code: CodeSnippet, language: LanguageTag) -> Self {
        Self { code, language }
    }

    /// The source text to document.
    pub fn code(&self) -> &CodeSnippet {
        &self.code
    }

    /// The language tag forwarded to the backend.
    pub fn language(&self) -> &LanguageTag {
        &self.language
    }
}
