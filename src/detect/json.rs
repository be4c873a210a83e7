//! JSON validity and structured-message checks.
//!
//! Plain JSON is only checked for parse errors. The structured-message
//! profile additionally inspects the root object: the discriminator field
//! must carry the expected tag, and the recommended accessibility field
//! should be present. Structural findings point at line 1 since the parsed
//! value no longer carries positions.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::{Analyzer, Diagnostic, Language, Rule};
use crate::config::StructuredMessageConfig;

lazy_static! {
    /// Line number inside a parser error message.
    static ref ERROR_LINE: Regex = Regex::new(r"line (\d+)").unwrap();
}

/// Analyzer for JSON documents and structured messages.
#[derive(Debug, Clone, Default)]
pub struct JsonAnalyzer {
    config: StructuredMessageConfig,
}

impl JsonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StructuredMessageConfig) -> Self {
        Self { config }
    }

    fn check_structure(&self, root: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let cfg = &self.config;

        let tag = root.get(&cfg.discriminator).and_then(Value::as_str);
        if tag != Some(cfg.expected_type.as_str()) {
            diagnostics.push(Diagnostic::new(
                Rule::MissingDiscriminator,
                format!(
                    "root object must have \"{}\": \"{}\"",
                    cfg.discriminator, cfg.expected_type
                ),
                1,
            ));
        }

        if !root.get(&cfg.recommended_field).map(is_truthy).unwrap_or(false) {
            diagnostics.push(Diagnostic::new(
                Rule::MissingRecommendedField,
                format!(
                    "add \"{}\" so clients that cannot render the message still show something",
                    cfg.recommended_field
                ),
                1,
            ));
        }

        diagnostics
    }
}

impl Analyzer for JsonAnalyzer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Json, Language::StructuredMessage]
    }

    fn analyze(&self, source: &str, language: Language) -> Vec<Diagnostic> {
        match serde_json::from_str::<Value>(source) {
            Ok(root) if language == Language::StructuredMessage => self.check_structure(&root),
            Ok(_) => Vec::new(),
            Err(e) => {
                let reason = e.to_string();
                vec![Diagnostic::new(
                    Rule::InvalidJson,
                    format!("invalid JSON: {}", reason),
                    error_line(&reason),
                )]
            }
        }
    }
}

/// Pull a 1-based line number out of a parser message, defaulting to 1.
fn error_line(reason: &str) -> usize {
    ERROR_LINE
        .captures(reason)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Loose truthiness: null, false, 0 and "" count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
