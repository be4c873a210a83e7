//! Best-effort re-formatting.
//!
//! JSON documents are parsed and pretty-printed, which is lossless apart
//! from whitespace and fails as a whole on invalid input. Everything else
//! goes through a naive indenter that only looks at the first and last
//! character of each trimmed line:
//!
//! ```text
//! function f() {        depth 0, opens → 1
//! let x = [             depth 1, opens → 2
//! 1,                    depth 2
//! ];                    closes → depth 1
//! }                     closes → depth 0
//! ```
//!
//! Braces inside strings or several on one line are not understood.

use crate::detect::Language;
use crate::error::Result;

/// Re-formats snippets.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    indent_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl Formatter {
    /// Create a formatter using `indent_width` spaces per level for the
    /// brace indenter. JSON output always uses two spaces.
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Format `text` as `language`.
    pub fn format(&self, text: &str, language: Language) -> Result<String> {
        if language.is_json_family() {
            format_json(text)
        } else {
            Ok(self.reindent(text))
        }
    }

    /// Re-indent by brace/bracket depth.
    pub fn reindent(&self, text: &str) -> String {
        let unit = " ".repeat(self.indent_width);
        let mut depth: usize = 0;

        text.split('\n')
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.starts_with('}') || trimmed.starts_with(']') {
                    depth = depth.saturating_sub(1);
                }
                let out = format!("{}{}", unit.repeat(depth), trimmed);
                if trimmed.ends_with('{') || trimmed.ends_with('[') {
                    depth += 1;
                }
                out
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse and pretty-print a JSON document with two-space indentation,
/// keeping key order.
pub fn format_json(text: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Format with default settings.
pub fn format(text: &str, language: Language) -> Result<String> {
    Formatter::default().format(text, language)
}
