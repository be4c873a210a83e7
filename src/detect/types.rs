//! Core types for analysis results.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule names for the checks that produce diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    #[serde(rename = "missing_terminator")]
    MissingTerminator,
    #[serde(rename = "unused_declaration")]
    UnusedDeclaration,
    #[serde(rename = "missing_block_colon")]
    MissingBlockColon,
    #[serde(rename = "invalid_json")]
    InvalidJson,
    #[serde(rename = "missing_discriminator")]
    MissingDiscriminator,
    #[serde(rename = "missing_recommended_field")]
    MissingRecommendedField,
    #[serde(rename = "empty_input")]
    EmptyInput,
    #[serde(rename = "clean")]
    Clean,
}

impl Rule {
    pub const ALL: &'static [Rule] = &[
        Rule::MissingTerminator,
        Rule::UnusedDeclaration,
        Rule::MissingBlockColon,
        Rule::InvalidJson,
        Rule::MissingDiscriminator,
        Rule::MissingRecommendedField,
        Rule::EmptyInput,
        Rule::Clean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::MissingTerminator => "missing_terminator",
            Rule::UnusedDeclaration => "unused_declaration",
            Rule::MissingBlockColon => "missing_block_colon",
            Rule::InvalidJson => "invalid_json",
            Rule::MissingDiscriminator => "missing_discriminator",
            Rule::MissingRecommendedField => "missing_recommended_field",
            Rule::EmptyInput => "empty_input",
            Rule::Clean => "clean",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Rule::ALL.iter().copied().find(|r| r.as_str() == s)
    }

    /// The severity this rule always reports with, whatever the language.
    pub fn severity(&self) -> Severity {
        match self {
            Rule::MissingTerminator
            | Rule::MissingBlockColon
            | Rule::InvalidJson
            | Rule::MissingDiscriminator => Severity::Error,
            Rule::MissingRecommendedField | Rule::EmptyInput => Severity::Warning,
            Rule::UnusedDeclaration => Severity::Info,
            Rule::Clean => Severity::Success,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The textual patch a fixable diagnostic carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    AppendSemicolon,
    AppendColon,
}

impl FixKind {
    /// Text appended to the captured line.
    pub fn suffix(&self) -> &'static str {
        match self {
            FixKind::AppendSemicolon => ";",
            FixKind::AppendColon => ":",
        }
    }
}

/// Fix payload captured at diagnosis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub kind: FixKind,
    /// The offending line exactly as it was when analyzed.
    pub original_line: String,
}

impl Fix {
    /// The replacement text for the line.
    ///
    /// A trailing `\r` from a CRLF line ending stays at the end.
    pub fn patched_line(&self) -> String {
        match self.original_line.strip_suffix('\r') {
            Some(body) => format!("{}{}\r", body, self.kind.suffix()),
            None => format!("{}{}", self.original_line, self.kind.suffix()),
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
    /// 1-based line, 0 when the finding has no location.
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Create a diagnostic without a fix. Severity follows the rule.
    pub fn new(rule: Rule, message: impl Into<String>, line: usize) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message: message.into(),
            line,
            fix: None,
        }
    }

    /// Create a fixable diagnostic for a located line.
    ///
    /// A fix needs a location: with `line == 0` the diagnostic is created
    /// without one.
    pub fn fixable(
        rule: Rule,
        message: impl Into<String>,
        line: usize,
        kind: FixKind,
        original_line: &str,
    ) -> Self {
        let fix = (line > 0).then(|| Fix {
            kind,
            original_line: original_line.to_string(),
        });
        Self {
            fix,
            ..Self::new(rule, message, line)
        }
    }

    pub fn empty_input() -> Self {
        Self::new(Rule::EmptyInput, "nothing to check: input is empty", 0)
    }

    pub fn clean() -> Self {
        Self::new(Rule::Clean, "no problems found", 0)
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }

    pub fn original_line(&self) -> Option<&str> {
        self.fix.as_ref().map(|f| f.original_line.as_str())
    }
}

/// Language tags understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Json,
    StructuredMessage,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Json,
        Language::StructuredMessage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Json => "json",
            Language::StructuredMessage => "structured-message",
        }
    }

    /// Whether the language is parsed as a JSON document.
    pub fn is_json_family(&self) -> bool {
        matches!(self, Language::Json | Language::StructuredMessage)
    }

    /// Guess a language from a file name.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".flex.json") {
            return Some(Language::StructuredMessage);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Map a file extension (without dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "tsx" => Some(Language::TypeScript),
            "py" => Some(Language::Python),
            "json" => Some(Language::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            "json" => Ok(Language::Json),
            "structured-message" | "line-flex" | "flex" => Ok(Language::StructuredMessage),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_language_tags() {
        assert_eq!("js".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("TypeScript".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!(
            "line-flex".parse::<Language>().unwrap(),
            Language::StructuredMessage
        );
        assert_eq!(
            "cobol".parse::<Language>(),
            Err(Error::UnknownLanguage("cobol".to_string()))
        );
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            Language::from_path(Path::new("card.flex.json")),
            Some(Language::StructuredMessage)
        );
        assert_eq!(Language::from_path(Path::new("data.json")), Some(Language::Json));
        assert_eq!(Language::from_path(Path::new("app.tsx")), Some(Language::TypeScript));
        assert_eq!(Language::from_path(Path::new("README.md")), None);
    }

    #[test]
    fn test_rule_roundtrip_and_severity() {
        for rule in Rule::ALL {
            assert_eq!(Rule::parse(rule.as_str()), Some(*rule));
        }
        assert_eq!(Rule::MissingTerminator.severity(), Severity::Error);
        assert_eq!(Rule::MissingBlockColon.severity(), Severity::Error);
        assert_eq!(Rule::UnusedDeclaration.severity(), Severity::Info);
        assert_eq!(Rule::MissingRecommendedField.severity(), Severity::Warning);
        assert_eq!(Rule::parse("nope"), None);
    }

    #[test]
    fn test_fixable_diagnostic_carries_line() {
        let d = Diagnostic::fixable(
            Rule::MissingTerminator,
            "missing statement terminator",
            2,
            FixKind::AppendSemicolon,
            "  let r = a+b",
        );
        assert!(d.is_fixable());
        assert_eq!(d.original_line(), Some("  let r = a+b"));
        assert_eq!(d.fix.unwrap().patched_line(), "  let r = a+b;");
        assert!(!Diagnostic::clean().is_fixable());
        assert_eq!(Diagnostic::empty_input().line, 0);
    }

    #[test]
    fn test_fixable_without_location_has_no_fix() {
        let d = Diagnostic::fixable(
            Rule::MissingBlockColon,
            "missing colon",
            0,
            FixKind::AppendColon,
            "if x",
        );
        assert!(!d.is_fixable());
        assert_eq!(d.original_line(), None);
    }

    #[test]
    fn test_patched_line_keeps_crlf() {
        let fix = Fix {
            kind: FixKind::AppendColon,
            original_line: "def f(x)\r".to_string(),
        };
        assert_eq!(fix.patched_line(), "def f(x):\r");
    }
}
