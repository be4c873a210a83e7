//! Line-oriented checks for JavaScript and TypeScript snippets.
//!
//! Two independent passes:
//! - statements that look like they are missing a trailing `;`
//! - `let`/`const`/`var` names that never appear again
//!
//! Neither pass tokenizes. Strings, comments and template literals are
//! treated as plain text, so false positives inside them are expected.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::{Analyzer, Diagnostic, FixKind, Language, Rule};
use crate::config::JavaScriptConfig;

lazy_static! {
    /// First `let`/`const`/`var` declaration on a line.
    static ref DECLARATION: Regex = Regex::new(r"\b(?:let|const|var)\s+([A-Za-z0-9_]+)").unwrap();

    /// Identifier-shaped tokens.
    static ref IDENTIFIER: Regex = Regex::new(r"[A-Za-z0-9_]+").unwrap();
}

/// Keywords never counted as a use of a declared name.
const KEYWORDS: &[&str] = &[
    "let", "const", "var", "function", "return", "if", "for", "while", "switch", "case",
];

pub const MISSING_TERMINATOR_MSG: &str = "missing statement terminator `;` at end of line";

/// Analyzer for JavaScript and TypeScript.
#[derive(Debug, Clone, Default)]
pub struct JavaScriptAnalyzer {
    config: JavaScriptConfig,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JavaScriptConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for JavaScriptAnalyzer {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::JavaScript, Language::TypeScript]
    }

    fn analyze(&self, source: &str, _language: Language) -> Vec<Diagnostic> {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut diagnostics = scan_terminators(&lines, &self.config);
        diagnostics.extend(scan_unused(&lines, &self.config));
        diagnostics
    }
}

/// Whether a trimmed line looks like a statement that should end in `;`.
fn needs_terminator(trimmed: &str) -> bool {
    let starts_like_statement = trimmed
        .chars()
        .next()
        .map(|c| c.is_ascii_alphanumeric() || c == '_')
        .unwrap_or(false);

    starts_like_statement && !trimmed.ends_with(|c: char| matches!(c, '{' | '}' | '(' | ',' | ';'))
}

/// Whether the next non-blank line after `index` opens with `}`.
fn closes_block_next(lines: &[&str], index: usize) -> bool {
    lines[index + 1..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(|l| l.starts_with('}'))
        .unwrap_or(false)
}

fn scan_terminators(lines: &[&str], config: &JavaScriptConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if !needs_terminator(line.trim()) {
            continue;
        }
        if config.skip_before_closing_brace && closes_block_next(lines, index) {
            continue;
        }

        diagnostics.push(Diagnostic::fixable(
            Rule::MissingTerminator,
            MISSING_TERMINATOR_MSG,
            index + 1,
            FixKind::AppendSemicolon,
            line,
        ));
    }

    diagnostics
}

/// Report declared names that never appear again.
///
/// Every identifier-shaped token counts as a use except keywords and the
/// declaring token itself. Counting the declaration as a use would mark
/// every declared name as used, so the rule could never report anything.
fn scan_unused(lines: &[&str], config: &JavaScriptConfig) -> Vec<Diagnostic> {
    // Insertion order is the report order.
    let mut declared: Vec<&str> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    for line in lines {
        let declaration = DECLARATION.captures(line).and_then(|caps| caps.get(1));

        if let Some(name) = declaration {
            if !declared.contains(&name.as_str()) {
                declared.push(name.as_str());
            }
        }

        for token in IDENTIFIER.find_iter(line) {
            // The declaring occurrence itself is not a use.
            if declaration.map(|d| d.start()) == Some(token.start()) {
                continue;
            }
            if KEYWORDS.contains(&token.as_str()) {
                continue;
            }
            used.insert(token.as_str());
        }
    }

    declared
        .into_iter()
        .filter(|name| !used.contains(name))
        .map(|name| {
            Diagnostic::new(
                Rule::UnusedDeclaration,
                format!("'{}' is declared but never used", name),
                locate(lines, name, config.locate_unused_by_word),
            )
        })
        .collect()
}

/// First 1-based line mentioning `name`.
fn locate(lines: &[&str], name: &str, by_word: bool) -> usize {
    let position = if by_word {
        Regex::new(&format!(r"\b{}\b", regex::escape(name)))
            .ok()
            .and_then(|word| lines.iter().position(|l| word.is_match(l)))
    } else {
        None
    };

    position
        .or_else(|| lines.iter().position(|l| l.contains(name)))
        .map(|i| i + 1)
        .unwrap_or(0)
}
