//! Glob-style URL match patterns used to route a page to its parser.

use crate::error::RegistryError;
use regex::Regex;
use std::fmt;

/// A URL glob where `*` matches any run of characters, `/` included.
///
/// The whole URL must match; there is no implicit prefix or suffix.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    glob: String,
    regex: Regex,
}

impl MatchPattern {
    pub fn new(glob: &str) -> Result<Self, RegistryError> {
        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex =
            Regex::new(&format!("^{body}$")).map_err(|source| RegistryError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}
