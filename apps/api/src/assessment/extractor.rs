//! Response extraction: locates the JSON payload inside free-form LLM text.
//!
//! Strategies run most- to least-specific and the first hit wins, so prose
//! that happens to contain braces is only captured when no fence is present.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json[ \t]*\r?\n?([\s\S]*?)```").expect("Invalid regex pattern"));

static BARE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([\s\S]*?)```").expect("Invalid regex pattern"));

static OUTER_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("Invalid regex pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON payload found in model response")]
    NoJsonFound,
}

/// One way of finding a JSON payload in a response.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_extract<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// A block opened by ```` ```json ```` and closed by ```` ``` ````.
pub struct JsonFenceStrategy;

impl ExtractionStrategy for JsonFenceStrategy {
    fn name(&self) -> &'static str {
        "json_fence"
    }

    fn try_extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        JSON_FENCE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}

/// An untagged fence whose trimmed interior starts with `{`.
pub struct BareFenceStrategy;

impl ExtractionStrategy for BareFenceStrategy {
    fn name(&self) -> &'static str {
        "bare_fence"
    }

    fn try_extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        BARE_FENCE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|interior| interior.starts_with('{'))
    }
}

/// Greedy outermost `{ ... }` anywhere in the text.
pub struct OuterBracesStrategy;

impl ExtractionStrategy for OuterBracesStrategy {
    fn name(&self) -> &'static str {
        "outer_braces"
    }

    fn try_extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        OUTER_BRACES.find(text).map(|m| m.as_str())
    }
}

/// Ordered strategy chain.
pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self {
            strategies: vec![
                Box::new(JsonFenceStrategy),
                Box::new(BareFenceStrategy),
                Box::new(OuterBracesStrategy),
            ],
        }
    }
}

impl ResponseExtractor {
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract<'a>(&self, text: &'a str) -> Result<&'a str, ExtractionError> {
        for strategy in &self.strategies {
            if let Some(payload) = strategy.try_extract(text) {
                debug!(
                    "Extracted {} bytes of JSON via {}",
                    payload.len(),
                    strategy.name()
                );
                return Ok(payload);
            }
        }
        Err(ExtractionError::NoJsonFound)
    }
}

/// Runs the default strategy chain.
pub fn extract_json(text: &str) -> Result<&str, ExtractionError> {
    ResponseExtractor::default().extract(text)
}
