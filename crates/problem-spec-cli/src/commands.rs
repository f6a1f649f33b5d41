//! Subcommand implementations.

use crate::output::{self, Styled};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use problem_spec::{ParserRegistry, ProblemSpec, StrategyKind};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Which strategies `parse` may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// The judge's configured order, with fallback.
    Auto,
    Structural,
    Payload,
}

impl StrategyChoice {
    fn kind(self) -> Option<StrategyKind> {
        match self {
            StrategyChoice::Auto => None,
            StrategyChoice::Structural => Some(StrategyKind::Structural),
            StrategyChoice::Payload => Some(StrategyKind::Payload),
        }
    }
}

/// Load the judge set from `config`, or the built-in one.
pub fn load_registry(config: Option<&Path>) -> Result<ParserRegistry> {
    match config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading judge config {}", path.display()))?;
            let registry = ParserRegistry::from_json(&json)
                .with_context(|| format!("loading judge config {}", path.display()))?;
            info!(judges = registry.parsers().len(), path = %path.display(), "loaded judge config");
            Ok(registry)
        }
        None => ParserRegistry::load_builtin().context("loading built-in judges"),
    }
}

fn read_markup(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading page {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading page from stdin")?;
            Ok(buf)
        }
    }
}

/// Extract a problem specification from a saved page.
pub fn parse(
    url: &str,
    registry: &mut ParserRegistry,
    markup: &str,
    strategy: StrategyChoice,
) -> Result<ProblemSpec> {
    if let Some(kind) = strategy.kind() {
        for parser in registry.parsers_mut() {
            parser.retain_strategy(kind);
        }
    }

    let Some(parser) = registry.find(url) else {
        bail!("no judge is configured for {url}");
    };
    if parser.strategy_order().is_empty() {
        bail!("judge {} has no {strategy:?} strategy", parser.group());
    }

    let spec = parser
        .parse(url, markup)
        .with_context(|| format!("extracting problem from {url}"))?;
    info!(name = spec.name(), tests = spec.tests().len(), "parsed problem");
    Ok(spec)
}

/// `problem-spec parse`
pub fn run_parse(
    url: &str,
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    strategy: StrategyChoice,
    compact: bool,
) -> Result<()> {
    let mut registry = load_registry(config.as_deref())?;
    let markup = read_markup(input.as_deref())?;
    let spec = parse(url, &mut registry, &markup, strategy)?;
    println!("{}", output::render_json(&spec, compact)?);
    Ok(())
}

/// `problem-spec judges`
pub fn run_judges(config: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(config.as_deref())?;
    let s = Styled::new();

    for parser in registry.parsers() {
        let order: Vec<String> = parser
            .strategy_order()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("{} {}", s.bold(parser.group()), s.dim(&order.join(" -> ")));
        for pattern in parser.patterns() {
            println!("    {pattern}");
        }
    }
    Ok(())
}
