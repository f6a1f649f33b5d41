//! The canonical problem specification handed to consumers.

use crate::builder::TaskBuilder;
use crate::error::ExtractError;
use serde::{Deserialize, Serialize};

/// One sample `(input, output)` pair shown on the problem page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// A normalized problem specification.
///
/// Limits are always in milliseconds and mebibytes, whatever unit the page
/// used. Instances are only produced by
/// [`TaskBuilder::build`](crate::TaskBuilder::build) and expose no mutators.
/// Deserializing goes through the same builder, so a stored specification
/// that violates those checks is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredProblemSpec")]
pub struct ProblemSpec {
    pub(crate) name: String,
    pub(crate) group: String,
    pub(crate) url: String,
    pub(crate) time_limit_millis: u64,
    pub(crate) memory_limit_mebibytes: u64,
    pub(crate) tests: Vec<TestCase>,
}

impl ProblemSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label of the judge that produced this task.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn time_limit_millis(&self) -> u64 {
        self.time_limit_millis
    }

    pub fn memory_limit_mebibytes(&self) -> u64 {
        self.memory_limit_mebibytes
    }

    /// Sample tests in page order.
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }
}

/// Unvalidated wire form of a [`ProblemSpec`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProblemSpec {
    name: String,
    #[serde(default)]
    group: String,
    #[serde(default)]
    url: String,
    time_limit_millis: u64,
    memory_limit_mebibytes: u64,
    #[serde(default)]
    tests: Vec<TestCase>,
}

impl TryFrom<StoredProblemSpec> for ProblemSpec {
    type Error = ExtractError;

    fn try_from(stored: StoredProblemSpec) -> Result<Self, Self::Error> {
        let mut task = TaskBuilder::new(stored.group);
        task.set_name(stored.name)
            .set_url(stored.url)
            .set_time_limit(stored.time_limit_millis)
            .set_memory_limit(stored.memory_limit_mebibytes);
        for test in stored.tests {
            task.add_test(test.input, test.output);
        }
        task.build()
    }
}
