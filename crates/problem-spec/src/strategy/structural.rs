//! Read a problem straight from the page's visible markup.

use super::{ExtractionStrategy, StrategyKind};
use crate::builder::TaskBuilder;
use crate::document::Document;
use crate::error::{ExtractError, Result, SamplePart};
use crate::limits;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selectors locating each fact on the page.
///
/// Defaults describe the Deeplearning problem page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralLayout {
    /// Element whose text is the problem title.
    pub title: String,
    /// Element whose second whitespace-separated token is the time limit in seconds.
    pub time_limit: String,
    /// Element whose second whitespace-separated token is the memory limit in MiB.
    pub memory_limit: String,
    /// One element per sample test.
    pub sample: String,
    /// Input block, relative to a sample element.
    pub sample_input: String,
    /// Output block, relative to a sample element.
    pub sample_output: String,
}

impl Default for StructuralLayout {
    fn default() -> Self {
        Self {
            title: ".panel-title > span".to_string(),
            time_limit: ".question-intr > span:nth-child(1)".to_string(),
            memory_limit: ".question-intr > span:nth-child(3)".to_string(),
            sample: ".example".to_string(),
            sample_input: ".example-input > pre".to_string(),
            sample_output: ".example-output > pre".to_string(),
        }
    }
}

/// Extracts a problem from markup laid out according to a [`StructuralLayout`].
#[derive(Debug, Clone, Default)]
pub struct StructuralExtractor {
    layout: StructuralLayout,
}

impl StructuralExtractor {
    pub fn new(layout: StructuralLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StructuralLayout {
        &self.layout
    }

    fn read_time_limit(&self, document: &Document) -> Result<u64> {
        let line = Document::text(document.find_one(&self.layout.time_limit)?);
        second_token(&line)
            .and_then(limits::seconds_to_millis)
            .ok_or(ExtractError::InvalidLimit {
                field: "time limit",
                value: line,
            })
    }

    fn read_memory_limit(&self, document: &Document) -> Result<u64> {
        let line = Document::text(document.find_one(&self.layout.memory_limit)?);
        second_token(&line)
            .and_then(limits::leading_integer)
            .ok_or(ExtractError::InvalidLimit {
                field: "memory limit",
                value: line,
            })
    }
}

impl ExtractionStrategy for StructuralExtractor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Structural
    }

    fn extract(&self, document: &Document, task: &mut TaskBuilder) -> Result<()> {
        let title = document.find_one(&self.layout.title)?;
        task.set_name(Document::text(title));

        task.set_time_limit(self.read_time_limit(document)?);
        task.set_memory_limit(self.read_memory_limit(document)?);

        for (index, sample) in document.find_all(&self.layout.sample)?.into_iter().enumerate() {
            let input = document
                .find_one_in(sample, &self.layout.sample_input)?
                .ok_or(ExtractError::MalformedSample {
                    index,
                    part: SamplePart::Input,
                })?;
            let output = document
                .find_one_in(sample, &self.layout.sample_output)?
                .ok_or(ExtractError::MalformedSample {
                    index,
                    part: SamplePart::Output,
                })?;

            task.add_test(Document::text(input), Document::text(output));
        }

        debug!(samples = task.test_count(), "structural extraction complete");
        Ok(())
    }
}

/// Limits lines read like `"Time: 1.5 s"`; the value is the second token.
fn second_token(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}
