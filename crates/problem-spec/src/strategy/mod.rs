//! Extraction strategies.
//!
//! A page can describe a problem twice: once in its visible markup and once
//! in a machine-readable blob that the judge embeds for its own front end.
//! Each strategy reads one of those representations and feeds a
//! [`TaskBuilder`]. They are independent and can be composed in any order by
//! [`ProblemParser`](crate::ProblemParser).

pub mod payload;
pub mod structural;

use crate::builder::TaskBuilder;
use crate::document::Document;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use payload::{PayloadExtractor, PayloadLayout};
pub use structural::{StructuralExtractor, StructuralLayout};

/// Which representation of the page a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Selector queries against the rendered markup.
    Structural,
    /// JSON payload embedded in an inline script.
    Payload,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Structural => f.write_str("structural"),
            StrategyKind::Payload => f.write_str("payload"),
        }
    }
}

/// Common contract for every extraction strategy.
///
/// On success the builder holds everything the strategy could find. On
/// failure the builder must be discarded; it may hold partial state.
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn extract(&self, document: &Document, task: &mut TaskBuilder) -> Result<()>;
}
