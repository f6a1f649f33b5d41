//! Error types for extraction and registry loading.

use std::fmt;
use thiserror::Error;

/// Which half of a sample container was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePart {
    Input,
    Output,
}

impl fmt::Display for SamplePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplePart::Input => f.write_str("input"),
            SamplePart::Output => f.write_str("output"),
        }
    }
}

/// Errors raised while turning a page into a [`ProblemSpec`](crate::ProblemSpec).
///
/// Every variant is terminal for the extraction attempt that produced it.
/// Callers composing several strategies use [`ExtractError::is_strategy_miss`]
/// to decide whether trying another strategy makes sense.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required element is absent from the markup.
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// A configured selector could not be compiled.
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A sample container exists but one of its halves does not.
    #[error("sample #{index} has no {part} block")]
    MalformedSample { index: usize, part: SamplePart },

    /// A limit was present but could not be read as a positive number.
    #[error("invalid {field}: {value:?}")]
    InvalidLimit { field: &'static str, value: String },

    /// No script block starts with the payload marker.
    #[error("no script block starts with {marker:?}")]
    PayloadNotFound { marker: String },

    /// The payload could not be percent-decoded or parsed as JSON.
    #[error("payload decode failed: {reason}")]
    PayloadDecode { reason: String },

    /// The decoded payload does not have the expected structure.
    #[error("payload has unexpected shape at {path}: {reason}")]
    PayloadShape { path: String, reason: String },

    /// `build()` was called before every required field was set.
    #[error("incomplete specification, missing: {}", .missing.join(", "))]
    IncompleteSpecification { missing: Vec<&'static str> },

    /// `build()` was called on a builder that was already consumed.
    #[error("task builder was already consumed by an earlier build()")]
    AlreadyBuilt,

    /// No registered parser accepts the URL.
    #[error("no parser matches {url}")]
    UnsupportedUrl { url: String },

    /// The matching parser has no strategy left to run.
    #[error("judge {group:?} has no extraction strategies")]
    NoStrategies { group: String },
}

impl ExtractError {
    /// Whether this error means "this strategy does not apply to the page"
    /// rather than "the page is broken".
    pub fn is_strategy_miss(&self) -> bool {
        matches!(
            self,
            ExtractError::ElementNotFound { .. } | ExtractError::PayloadNotFound { .. }
        )
    }
}

/// Errors raised while loading a judge configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid judge configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("invalid match pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("judge {group:?} has no extraction strategies")]
    EmptyStrategies { group: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
