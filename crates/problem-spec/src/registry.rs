//! Judge registry: which parser handles which URL.
//!
//! The built-in judge set is compiled into the binary from `judges.json`.
//! A replacement set with the same schema can be loaded at runtime with
//! [`ParserRegistry::from_json`].

use crate::error::{ExtractError, RegistryError, Result};
use crate::parser::ProblemParser;
use crate::pattern::MatchPattern;
use crate::strategy::{
    PayloadExtractor, PayloadLayout, StrategyKind, StructuralExtractor, StructuralLayout,
};
use crate::task::ProblemSpec;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Raw JSON of the built-in judge definitions, embedded at compile time.
const BUILTIN_JUDGES_JSON: &str = include_str!("judges.json");

/// One judge entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
struct JudgeConfig {
    group: String,
    patterns: Vec<String>,
    #[serde(default = "default_strategies")]
    strategies: Vec<StrategyKind>,
    #[serde(default)]
    structural: StructuralLayout,
    #[serde(default)]
    payload: PayloadLayout,
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![StrategyKind::Structural, StrategyKind::Payload]
}

impl JudgeConfig {
    fn into_parser(self) -> std::result::Result<ProblemParser, RegistryError> {
        if self.strategies.is_empty() {
            return Err(RegistryError::EmptyStrategies { group: self.group });
        }

        let mut parser = ProblemParser::new(self.group);
        for glob in &self.patterns {
            parser = parser.with_pattern(MatchPattern::new(glob)?);
        }
        for kind in self.strategies {
            parser = match kind {
                StrategyKind::Structural => {
                    parser.with_strategy(StructuralExtractor::new(self.structural.clone()))
                }
                StrategyKind::Payload => {
                    parser.with_strategy(PayloadExtractor::new(self.payload.clone()))
                }
            };
        }
        Ok(parser)
    }
}

/// An ordered set of judge parsers. The first parser whose pattern matches a
/// URL handles it.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    parsers: Vec<ProblemParser>,
}

impl ParserRegistry {
    /// The built-in judge set, parsed once and shared.
    pub fn builtin() -> &'static ParserRegistry {
        static REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            Self::load_builtin().unwrap_or_else(|e| {
                warn!("built-in judge configuration is invalid: {e}");
                Self::default()
            })
        })
    }

    /// A fresh, owned copy of the built-in judge set.
    pub fn load_builtin() -> std::result::Result<Self, RegistryError> {
        Self::from_json(BUILTIN_JUDGES_JSON)
    }

    /// Load a judge set from a JSON array of judge entries.
    pub fn from_json(json: &str) -> std::result::Result<Self, RegistryError> {
        let configs: Vec<JudgeConfig> = serde_json::from_str(json)?;
        let parsers = configs
            .into_iter()
            .map(JudgeConfig::into_parser)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { parsers })
    }

    pub fn parsers(&self) -> &[ProblemParser] {
        &self.parsers
    }

    /// Mutable access, e.g. to restrict every parser to one strategy.
    pub fn parsers_mut(&mut self) -> &mut [ProblemParser] {
        &mut self.parsers
    }

    pub fn register(&mut self, parser: ProblemParser) {
        self.parsers.push(parser);
    }

    /// First parser that accepts `url`.
    pub fn find(&self, url: &str) -> Option<&ProblemParser> {
        let found = self.parsers.iter().find(|p| p.matches(url));
        debug!(url, group = found.map(|p| p.group()), "registry lookup");
        found
    }

    /// Route `url` to its parser and extract the problem from `markup`.
    pub fn parse(&self, url: &str, markup: &str) -> Result<ProblemSpec> {
        self.find(url)
            .ok_or_else(|| ExtractError::UnsupportedUrl {
                url: url.to_string(),
            })?
            .parse(url, markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_loads() {
        let registry = ParserRegistry::builtin();
        let groups: Vec<&str> = registry.parsers().iter().map(|p| p.group()).collect();
        assert!(groups.contains(&"Deeplearning"));

        let deeplearning = registry
            .find("https://deeplearning.org.cn/problem/P1001")
            .unwrap();
        assert_eq!(
            deeplearning.strategy_order(),
            vec![StrategyKind::Structural, StrategyKind::Payload]
        );
        assert!(registry
            .find("https://deeplearning.org.cn/group/3/training/9/problem/P1001/full-screen")
            .is_some());
    }

    #[test]
    fn test_unsupported_url() {
        let err = ParserRegistry::builtin()
            .parse("https://example.com/problem/1", "<html></html>")
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedUrl { .. }));
    }

    #[test]
    fn test_from_json_defaults() {
        let registry = ParserRegistry::from_json(
            r#"[{"group": "Mirror", "patterns": ["https://mirror.example/*"]}]"#,
        )
        .unwrap();
        let parser = registry.find("https://mirror.example/p/1").unwrap();
        assert_eq!(parser.group(), "Mirror");
        assert_eq!(parser.strategy_order().len(), 2);
    }

    #[test]
    fn test_from_json_custom_layout() {
        let registry = ParserRegistry::from_json(
            r#"[{
                "group": "Custom",
                "patterns": ["https://custom.example/*"],
                "strategies": ["structural"],
                "structural": {
                    "title": "h1",
                    "time_limit": ".tl",
                    "memory_limit": ".ml",
                    "sample": ".s",
                    "sample_input": ".in",
                    "sample_output": ".out"
                }
            }]"#,
        )
        .unwrap();

        let markup = r#"<html><body>
            <h1>Custom Problem</h1>
            <p class="tl">time 3</p>
            <p class="ml">memory 64</p>
            <div class="s"><pre class="in">a</pre><pre class="out">b</pre></div>
        </body></html>"#;
        let spec = registry.parse("https://custom.example/1", markup).unwrap();
        assert_eq!(spec.name(), "Custom Problem");
        assert_eq!(spec.time_limit_millis(), 3000);
        assert_eq!(spec.memory_limit_mebibytes(), 64);
        assert_eq!(spec.tests().len(), 1);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            ParserRegistry::from_json("{not json"),
            Err(RegistryError::InvalidConfig(_))
        ));
        assert!(matches!(
            ParserRegistry::from_json(
                r#"[{"group": "X", "patterns": ["https://x/*"], "strategies": []}]"#
            ),
            Err(RegistryError::EmptyStrategies { .. })
        ));
        assert!(matches!(
            ParserRegistry::from_json(
                r#"[{"group": "X", "patterns": [], "strategies": ["html"]}]"#
            ),
            Err(RegistryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let registry = ParserRegistry::from_json(
            r#"[
                {"group": "Specific", "patterns": ["https://j.example/problem/*"]},
                {"group": "Catchall", "patterns": ["https://j.example/*"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            registry.find("https://j.example/problem/1").unwrap().group(),
            "Specific"
        );
        assert_eq!(
            registry.find("https://j.example/contest/1").unwrap().group(),
            "Catchall"
        );
    }
}
