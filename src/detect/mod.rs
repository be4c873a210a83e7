//! Detection of superficial syntax issues in code snippets.

mod explain;
mod javascript;
mod json;
mod python;
mod runner;
mod traits;
mod types;

pub use explain::{explain, explain_rule};
pub use javascript::JavaScriptAnalyzer;
pub use json::JsonAnalyzer;
pub use python::PythonAnalyzer;
pub use runner::{analyze, Dispatcher};
pub use traits::Analyzer;
pub use types::{Diagnostic, Fix, FixKind, Language, Rule, Severity};
