//! Recover a problem from the data blob a judge embeds in an inline script.
//!
//! Pages served by Luogu-style front ends carry a statement like
//!
//! ```text
//! window._feInjection = JSON.parse(decodeURIComponent("%7B%22currentData%22..."));
//! ```
//!
//! The quoted literal is percent-encoded JSON. Decoding it yields an object
//! whose `currentData.problem` node holds the title, limits and samples.

use super::{ExtractionStrategy, StrategyKind};
use crate::builder::TaskBuilder;
use crate::document::Document;
use crate::error::{ExtractError, Result};
use crate::limits;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Where the payload lives and how to reach the problem node inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadLayout {
    /// Text a script block must start with to be considered the payload.
    pub marker: String,
    /// Object keys leading from the decoded root to the problem node.
    pub path: Vec<String>,
}

impl Default for PayloadLayout {
    fn default() -> Self {
        Self {
            marker: "window._feInjection".to_string(),
            path: vec!["currentData".to_string(), "problem".to_string()],
        }
    }
}

// ── Payload shape ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProblemNode {
    #[serde(default)]
    pid: Option<Identifier>,
    #[serde(default)]
    title: Option<String>,
    limits: LimitsNode,
    #[serde(default)]
    samples: Vec<(String, String)>,
}

/// Candidate limits, one per subtask.
#[derive(Debug, Deserialize)]
struct LimitsNode {
    #[serde(default)]
    time: Vec<f64>,
    #[serde(default)]
    memory: Vec<f64>,
}

/// Problem ids are strings on most judges but bare numbers on some.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Text(s) => f.write_str(s),
            Identifier::Number(n) => write!(f, "{n}"),
        }
    }
}

// ── Extractor ───────────────────────────────────────────────────────────────

/// Extracts a problem from an embedded payload described by a [`PayloadLayout`].
#[derive(Debug, Clone, Default)]
pub struct PayloadExtractor {
    layout: PayloadLayout,
}

impl PayloadExtractor {
    pub fn new(layout: PayloadLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PayloadLayout {
        &self.layout
    }

    /// Text of the first script block that starts with the marker.
    fn locate_script(&self, document: &Document) -> Result<String> {
        for script in document.find_all("script")? {
            let text = Document::raw_text(script);
            if text.trim_start().starts_with(&self.layout.marker) {
                return Ok(text);
            }
        }
        Err(ExtractError::PayloadNotFound {
            marker: self.layout.marker.clone(),
        })
    }

    fn decode(&self, script: &str) -> Result<Value> {
        let encoded = quoted_literal(script).ok_or_else(|| ExtractError::PayloadDecode {
            reason: "payload script has no quoted string literal".to_string(),
        })?;
        let json = decode_component(encoded)?;
        serde_json::from_str(&json).map_err(|e| ExtractError::PayloadDecode {
            reason: format!("invalid JSON: {e}"),
        })
    }

    fn problem_node<'v>(&self, root: &'v Value) -> Result<&'v Value> {
        let mut node = root;
        for (depth, key) in self.layout.path.iter().enumerate() {
            node = node.get(key).ok_or_else(|| ExtractError::PayloadShape {
                path: self.layout.path[..=depth].join("."),
                reason: "key is missing".to_string(),
            })?;
        }
        Ok(node)
    }

    fn field_path(&self, field: &str) -> String {
        let mut parts = self.layout.path.clone();
        parts.push(field.to_string());
        parts.join(".")
    }
}

impl ExtractionStrategy for PayloadExtractor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Payload
    }

    fn extract(&self, document: &Document, task: &mut TaskBuilder) -> Result<()> {
        let script = self.locate_script(document)?;
        trace!(bytes = script.len(), "found payload script");

        let root = self.decode(&script)?;
        let node = self.problem_node(&root)?;
        let problem = ProblemNode::deserialize(node).map_err(|e| ExtractError::PayloadShape {
            path: self.layout.path.join("."),
            reason: e.to_string(),
        })?;

        let pid = problem.pid.map(|p| p.to_string()).unwrap_or_default();
        let title = problem.title.unwrap_or_default();
        task.set_name(format!("{pid} {title}").trim());

        let time = limits::max_candidate(&problem.limits.time).ok_or_else(|| {
            ExtractError::PayloadShape {
                path: self.field_path("limits.time"),
                reason: "no usable candidates".to_string(),
            }
        })?;
        let memory = limits::max_candidate(&problem.limits.memory).ok_or_else(|| {
            ExtractError::PayloadShape {
                path: self.field_path("limits.memory"),
                reason: "no usable candidates".to_string(),
            }
        })?;

        // Time is already in ms; memory is in KiB.
        task.set_time_limit(time as u64);
        task.set_memory_limit((memory / 1024.0) as u64);

        for (input, output) in problem.samples {
            task.add_test(input, output);
        }

        debug!(samples = task.test_count(), "payload extraction complete");
        Ok(())
    }
}

/// Text between the first and second double quote.
fn quoted_literal(script: &str) -> Option<&str> {
    let start = script.find('"')? + 1;
    let len = script[start..].find('"')?;
    Some(&script[start..start + len])
}

/// Percent-decode with `decodeURIComponent` semantics: every `%` must start
/// a two-digit hex escape and the decoded bytes must be UTF-8.
fn decode_component(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(ExtractError::PayloadDecode {
                reason: format!("malformed percent escape at byte {i}"),
            });
        }
    }

    urlencoding::decode(encoded)
        .map(|s| s.into_owned())
        .map_err(|e| ExtractError::PayloadDecode {
            reason: format!("decoded payload is not UTF-8: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with_payload(payload: &Value) -> String {
        let encoded = urlencoding::encode(&payload.to_string()).into_owned();
        format!(
            r#"<html><head>
            <script>var analytics = "ignored";</script>
            <script>window._feInjection = JSON.parse(decodeURIComponent("{encoded}"));window._feConfigVersion=1;</script>
            </head><body></body></html>"#
        )
    }

    fn sample_payload() -> Value {
        json!({
            "currentData": {
                "problem": {
                    "pid": "A",
                    "title": "Sum",
                    "limits": {
                        "time": [1000, 1500, 900],
                        "memory": [262144, 131072]
                    },
                    "samples": [["1 2\n", "3\n"], ["4 5\n", "9\n"]]
                }
            }
        })
    }

    fn extract(markup: &str) -> Result<crate::ProblemSpec> {
        let document = Document::parse(markup);
        let mut task = TaskBuilder::new("Deeplearning");
        PayloadExtractor::default().extract(&document, &mut task)?;
        task.build()
    }

    #[test]
    fn test_extract_payload() {
        let spec = extract(&page_with_payload(&sample_payload())).unwrap();
        assert_eq!(spec.name(), "A Sum");
        assert_eq!(spec.time_limit_millis(), 1500);
        assert_eq!(spec.memory_limit_mebibytes(), 256);
        assert_eq!(spec.tests().len(), 2);
        assert_eq!(spec.tests()[0].input, "1 2");
        assert_eq!(spec.tests()[1].output, "9");
    }

    #[test]
    fn test_numeric_pid_and_missing_samples() {
        let payload = json!({
            "currentData": {
                "problem": {
                    "pid": 1001,
                    "title": " A+B ",
                    "limits": { "time": [2000], "memory": [131072] }
                }
            }
        });
        let spec = extract(&page_with_payload(&payload)).unwrap();
        assert_eq!(spec.name(), "1001  A+B");
        assert!(spec.tests().is_empty());
        assert_eq!(spec.memory_limit_mebibytes(), 128);
    }

    #[test]
    fn test_no_marker_script() {
        let markup = "<html><head><script>var x = 1;</script></head></html>";
        let err = extract(markup).unwrap_err();
        assert!(matches!(err, ExtractError::PayloadNotFound { .. }));
    }

    #[test]
    fn test_bad_percent_escape() {
        let markup = r#"<script>window._feInjection = JSON.parse(decodeURIComponent("%7B%ZZ"));</script>"#;
        let err = extract(markup).unwrap_err();
        assert!(matches!(err, ExtractError::PayloadDecode { .. }));
    }

    #[test]
    fn test_truncated_percent_escape() {
        let markup = r#"<script>window._feInjection = JSON.parse(decodeURIComponent("%7"));</script>"#;
        assert!(matches!(
            extract(markup).unwrap_err(),
            ExtractError::PayloadDecode { .. }
        ));
    }

    #[test]
    fn test_invalid_json() {
        let markup = r#"<script>window._feInjection = JSON.parse(decodeURIComponent("%7Bnope"));</script>"#;
        assert!(matches!(
            extract(markup).unwrap_err(),
            ExtractError::PayloadDecode { .. }
        ));
    }

    #[test]
    fn test_no_quoted_literal() {
        let markup = "<script>window._feInjection = {};</script>";
        assert!(matches!(
            extract(markup).unwrap_err(),
            ExtractError::PayloadDecode { .. }
        ));
    }

    #[test]
    fn test_missing_problem_node() {
        let payload = json!({ "currentData": { "user": {} } });
        let err = extract(&page_with_payload(&payload)).unwrap_err();
        match err {
            ExtractError::PayloadShape { path, .. } => assert_eq!(path, "currentData.problem"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_limit_candidates() {
        let payload = json!({
            "currentData": {
                "problem": {
                    "pid": "A",
                    "title": "Sum",
                    "limits": { "time": [], "memory": [1024] }
                }
            }
        });
        let err = extract(&page_with_payload(&payload)).unwrap_err();
        match err {
            ExtractError::PayloadShape { path, .. } => {
                assert_eq!(path, "currentData.problem.limits.time")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_quoted_literal() {
        assert_eq!(quoted_literal(r#"f("abc", "def")"#), Some("abc"));
        assert_eq!(quoted_literal(r#"f("abc"#), None);
        assert_eq!(quoted_literal("f()"), None);
    }

    #[test]
    fn test_decode_component_utf8() {
        assert_eq!(decode_component("%E6%97%B6%E9%97%B4").unwrap(), "时间");
        assert!(decode_component("%FF%FE").is_err());
    }
}
