//! A judge-level parser: match patterns plus an ordered strategy chain.

use crate::builder::TaskBuilder;
use crate::document::Document;
use crate::error::{ExtractError, Result};
use crate::pattern::MatchPattern;
use crate::strategy::{ExtractionStrategy, StrategyKind};
use crate::task::ProblemSpec;
use tracing::debug;

/// Turns pages of one judge into [`ProblemSpec`]s.
///
/// Strategies are tried in order. When one reports a miss (its anchor
/// element or payload is absent, see [`ExtractError::is_strategy_miss`]) the
/// next one gets a fresh builder. Any other error ends the attempt.
pub struct ProblemParser {
    group: String,
    patterns: Vec<MatchPattern>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ProblemParser {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            patterns: Vec::new(),
            strategies: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: MatchPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn patterns(&self) -> &[MatchPattern] {
        &self.patterns
    }

    /// Strategy kinds in the order they are tried.
    pub fn strategy_order(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Whether any of this parser's patterns accepts `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }

    /// Keep only the strategies of `kind`, preserving their order.
    pub fn retain_strategy(&mut self, kind: StrategyKind) {
        self.strategies.retain(|s| s.kind() == kind);
    }

    /// Extract a problem from already-fetched markup.
    pub fn parse(&self, url: &str, markup: &str) -> Result<ProblemSpec> {
        let document = Document::parse(markup);
        self.parse_document(url, &document)
    }

    /// Extract a problem from a parsed document.
    pub fn parse_document(&self, url: &str, document: &Document) -> Result<ProblemSpec> {
        if self.strategies.is_empty() {
            return Err(ExtractError::NoStrategies {
                group: self.group.clone(),
            });
        }
        let mut last_miss = None;

        for strategy in &self.strategies {
            let mut task = TaskBuilder::new(self.group.as_str());
            task.set_url(url);

            match strategy.extract(document, &mut task) {
                Ok(()) => {
                    debug!(group = %self.group, strategy = %strategy.kind(), url, "extracted problem");
                    return task.build();
                }
                Err(e) if e.is_strategy_miss() => {
                    debug!(
                        group = %self.group,
                        strategy = %strategy.kind(),
                        error = %e,
                        "strategy does not apply, trying next"
                    );
                    last_miss = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_miss.unwrap_or_else(|| ExtractError::NoStrategies {
            group: self.group.clone(),
        }))
    }
}

impl std::fmt::Debug for ProblemParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProblemParser")
            .field("group", &self.group)
            .field("patterns", &self.patterns)
            .field("strategies", &self.strategy_order())
            .finish()
    }
}
