use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use unicity::UniqueRule;
use unicity_config::RuleConfig;

/// One JSON case file under `cases/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    /// File stem relative to the cases directory, filled in after loading.
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Document whose target values are checked.
    pub document: Value,
    /// Reference document searched for duplicates; defaults to `document`.
    #[serde(default)]
    pub context: Option<Value>,
    /// Run without any reference document.
    #[serde(default)]
    pub no_context: bool,
    pub rules: Vec<RuleConfig>,
    pub expect: Expectation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expectation {
    /// Rendered errors in report order.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Rendered warnings; unchecked when absent.
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl TestCase {
    pub fn load(path: &Path, name: impl Into<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read test file: {}", path.display()))?;
        let mut case: TestCase = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse test case: {}", path.display()))?;
        case.name = name.into();
        Ok(case)
    }

    pub fn rules(&self) -> Result<Vec<UniqueRule>> {
        self.rules
            .iter()
            .map(|rule| {
                rule.to_rule()
                    .with_context(|| format!("Invalid rule '{}'", rule.name))
            })
            .collect()
    }

    /// The reference document for this run.
    pub fn reference(&self) -> Option<&Value> {
        if self.no_context {
            None
        } else {
            Some(self.context.as_ref().unwrap_or(&self.document))
        }
    }
}
