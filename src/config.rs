//! Compile options.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How the compiled body hands the root symbol back to its host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultBinding {
    /// `return <root>;`
    #[default]
    Return,
    /// `<target> = <root>;`
    Assign { target: String },
    /// Emit declarations only.
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub result: ResultBinding,
    /// Prefix written before every emitted line.
    pub indent: String,
    /// Emit `// <node name>` above each declaration.
    pub node_comments: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            result: ResultBinding::Return,
            indent: String::new(),
            node_comments: false,
        }
    }
}

impl CompileOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid compile options json")
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read compile options at {}", path.display()))?;
        Self::from_json_str(&text)
    }
}
