//! Missing block colon detection for Python-like snippets.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Analyzer, Diagnostic, FixKind, Language, Rule};

lazy_static! {
    /// A block-opening statement that does not end in `:`.
    static ref OPEN_BLOCK_WITHOUT_COLON: Regex =
        Regex::new(r"^(if|for|while|def|class)\s.*[^:]$").unwrap();
}

pub const MISSING_COLON_MSG: &str = "missing block colon `:` at end of line";

/// Analyzer for Python.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for PythonAnalyzer {
    fn name(&self) -> &'static str {
        "python"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn analyze(&self, source: &str, _language: Language) -> Vec<Diagnostic> {
        source
            .split('\n')
            .enumerate()
            .filter(|(_, line)| OPEN_BLOCK_WITHOUT_COLON.is_match(line.trim()))
            .map(|(index, line)| {
                Diagnostic::fixable(
                    Rule::MissingBlockColon,
                    MISSING_COLON_MSG,
                    index + 1,
                    FixKind::AppendColon,
                    line,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged_lines(source: &str) -> Vec<usize> {
        PythonAnalyzer
            .analyze(source, Language::Python)
            .iter()
            .map(|d| d.line)
            .collect()
    }

    #[test]
    fn test_missing_colon() {
        let source = "def greet(name)\n    if name\n        print(name)\n    for x in xs:\n        pass";
        assert_eq!(flagged_lines(source), vec![1, 2]);

        let diags = PythonAnalyzer.analyze(source, Language::Python);
        assert_eq!(diags[1].original_line(), Some("    if name"));
        assert_eq!(diags[1].fix.as_ref().unwrap().kind, FixKind::AppendColon);
    }

    #[test]
    fn test_keyword_needs_following_token() {
        // A bare keyword, or a keyword glued to an identifier, is left alone.
        assert!(flagged_lines("else\nwhile\nformat(x)\nclassify(y)").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() {
        assert!(flagged_lines("class Foo:   ").is_empty());
        assert_eq!(flagged_lines("class Foo   "), vec![1]);
    }
}
