//! Single-use accumulator that assembles a [`ProblemSpec`].

use crate::error::{ExtractError, Result};
use crate::task::{ProblemSpec, TestCase};
use tracing::trace;

/// Collects facts about a problem and validates them all at once in
/// [`build`](TaskBuilder::build).
///
/// A builder is consumed by its first `build()` call, whether that call
/// succeeds or fails. Setters called afterwards are ignored. Create a new
/// builder per extraction attempt.
#[derive(Debug, Default)]
pub struct TaskBuilder {
    group: String,
    name: Option<String>,
    url: Option<String>,
    time_limit_millis: Option<u64>,
    memory_limit_mebibytes: Option<u64>,
    tests: Vec<TestCase>,
    built: bool,
}

impl TaskBuilder {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        if !self.built {
            self.name = Some(name.into());
        }
        self
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        if !self.built {
            self.url = Some(url.into());
        }
        self
    }

    /// Time limit in milliseconds.
    pub fn set_time_limit(&mut self, millis: u64) -> &mut Self {
        if !self.built {
            self.time_limit_millis = Some(millis);
        }
        self
    }

    /// Memory limit in mebibytes.
    pub fn set_memory_limit(&mut self, mebibytes: u64) -> &mut Self {
        if !self.built {
            self.memory_limit_mebibytes = Some(mebibytes);
        }
        self
    }

    /// Append a sample. Both halves are trimmed, so every strategy yields
    /// the same pairs for the same page.
    pub fn add_test(&mut self, input: impl AsRef<str>, output: impl AsRef<str>) -> &mut Self {
        if !self.built {
            self.tests.push(TestCase {
                input: input.as_ref().trim().to_string(),
                output: output.as_ref().trim().to_string(),
            });
        }
        self
    }

    /// Number of sample tests collected so far.
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Validate the accumulated state and produce the specification.
    ///
    /// Fails with [`ExtractError::AlreadyBuilt`] on every call after the
    /// first, and with [`ExtractError::IncompleteSpecification`] when the
    /// name or either limit was never set.
    pub fn build(&mut self) -> Result<ProblemSpec> {
        if self.built {
            return Err(ExtractError::AlreadyBuilt);
        }
        self.built = true;

        let name = self
            .name
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if self.time_limit_millis.is_none() {
            missing.push("timeLimitMillis");
        }
        if self.memory_limit_mebibytes.is_none() {
            missing.push("memoryLimitMebibytes");
        }

        match (name, self.time_limit_millis, self.memory_limit_mebibytes) {
            (Some(name), Some(time), Some(memory)) => {
                if time == 0 {
                    return Err(ExtractError::InvalidLimit {
                        field: "timeLimitMillis",
                        value: time.to_string(),
                    });
                }
                if memory == 0 {
                    return Err(ExtractError::InvalidLimit {
                        field: "memoryLimitMebibytes",
                        value: memory.to_string(),
                    });
                }

                let spec = ProblemSpec {
                    name,
                    group: std::mem::take(&mut self.group),
                    url: self.url.take().unwrap_or_default(),
                    time_limit_millis: time,
                    memory_limit_mebibytes: memory,
                    tests: std::mem::take(&mut self.tests),
                };
                trace!(
                    name = %spec.name,
                    tests = spec.tests.len(),
                    "built problem specification"
                );
                Ok(spec)
            }
            _ => Err(ExtractError::IncompleteSpecification { missing }),
        }
    }
}
