//! Extract normalized competitive-programming problem specifications from
//! judge pages.
//!
//! A page is handed in as already-fetched markup. One of two strategies reads
//! it: [`StructuralExtractor`] queries the rendered elements, while
//! [`PayloadExtractor`] decodes the JSON blob some judges embed in an inline
//! script. Either one fills a [`TaskBuilder`], which validates and
//! normalizes the facts into a [`ProblemSpec`] (milliseconds, mebibytes,
//! samples in page order).
//!
//! ```no_run
//! use problem_spec::ParserRegistry;
//!
//! # fn fetch(_: &str) -> String { String::new() }
//! let url = "https://deeplearning.org.cn/problem/P1001";
//! let spec = ParserRegistry::builtin().parse(url, &fetch(url))?;
//! println!("{} ({} ms, {} MiB)", spec.name(), spec.time_limit_millis(), spec.memory_limit_mebibytes());
//! # Ok::<(), problem_spec::ExtractError>(())
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod limits;
pub mod parser;
pub mod pattern;
pub mod registry;
pub mod strategy;
pub mod task;

pub use builder::TaskBuilder;
pub use document::Document;
pub use error::{ExtractError, RegistryError, Result, SamplePart};
pub use parser::ProblemParser;
pub use pattern::MatchPattern;
pub use registry::ParserRegistry;
pub use strategy::{
    ExtractionStrategy, PayloadExtractor, PayloadLayout, StrategyKind, StructuralExtractor,
    StructuralLayout,
};
pub use task::{ProblemSpec, TestCase};
