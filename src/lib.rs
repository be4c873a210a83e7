//! Snipcheck - quick syntax checks for code snippets.
//!
//! Snipcheck flags superficial syntax slips in small snippets: statements
//! missing a `;` in JavaScript/TypeScript, block headers missing a `:` in
//! Python, and malformed JSON. It can patch the fixable ones and re-indent
//! a snippet.
//!
//! It is deliberately not a parser. Every check is line-oriented and
//! pattern-driven, so false positives inside strings or comments are part
//! of the deal.
//!
//! # Architecture
//!
//! - `detect`: diagnostic model, language analyzers and the dispatcher
//! - `fix`: line-level patches driven by diagnostics
//! - `format`: JSON pretty-printer and brace indenter
//! - `config`: YAML configuration for the heuristics
//! - `report`: output formatting (pretty, JSON, SARIF)
//!
//! # Example
//!
//! ```
//! use snipcheck::{analyze, apply_bulk_fix, Language, Rule};
//!
//! let text = "function f(a,b) {\n  let r = a+b\n  return r;\n}";
//! let diagnostics = analyze(text, Language::JavaScript);
//! assert_eq!(diagnostics[0].rule, Rule::MissingTerminator);
//!
//! let fixed = apply_bulk_fix(text, &diagnostics);
//! assert_eq!(fixed.applied, 1);
//! assert!(fixed.text.contains("let r = a+b;"));
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod fix;
pub mod format;
pub mod report;

pub use config::Config;
pub use detect::{
    analyze, explain, explain_rule, Analyzer, Diagnostic, Dispatcher, Fix, FixKind, Language,
    Rule, Severity,
};
pub use error::{Error, Result};
pub use fix::{apply_bulk_fix, apply_single_fix, BulkFix};
pub use format::{format, Formatter};
