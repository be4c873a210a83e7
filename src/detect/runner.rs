//! Dispatcher that routes a snippet to the analyzer for its language.

use once_cell::sync::Lazy;

use crate::config::Config;

use super::{Analyzer, Diagnostic, JavaScriptAnalyzer, JsonAnalyzer, Language, PythonAnalyzer};

/// Dispatcher built with default settings.
static DEFAULT_DISPATCHER: Lazy<Dispatcher> = Lazy::new(Dispatcher::default);

/// Routes analysis requests to registered analyzers.
pub struct Dispatcher {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl Dispatcher {
    /// Create a dispatcher with no analyzers registered.
    pub fn empty() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Create a dispatcher with the built-in analyzers tuned by `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::empty()
            .register(Box::new(JavaScriptAnalyzer::with_config(config.javascript)))
            .register(Box::new(PythonAnalyzer::new()))
            .register(Box::new(JsonAnalyzer::with_config(
                config.structured_message.clone(),
            )))
    }

    /// Add an analyzer. Earlier registrations win for a shared language.
    pub fn register(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    /// Find the analyzer registered for `language`.
    pub fn analyzer_for(&self, language: Language) -> Option<&dyn Analyzer> {
        self.analyzers
            .iter()
            .find(|a| a.handles(language))
            .map(|a| a.as_ref())
    }

    /// Analyze a snippet.
    ///
    /// Never returns an empty list: blank input yields one warning without
    /// running any analyzer, and no findings yields one success diagnostic.
    pub fn analyze(&self, text: &str, language: Language) -> Vec<Diagnostic> {
        if text.trim().is_empty() {
            return vec![Diagnostic::empty_input()];
        }

        let diagnostics = self
            .analyzer_for(language)
            .map(|a| a.analyze(text, language))
            .unwrap_or_default();

        settle(diagnostics)
    }

    /// Analyze a snippet given a raw language tag.
    ///
    /// Unknown tags have nothing to check and report success.
    pub fn analyze_tag(&self, text: &str, tag: &str) -> Vec<Diagnostic> {
        match tag.parse::<Language>() {
            Ok(language) => self.analyze(text, language),
            Err(_) if text.trim().is_empty() => vec![Diagnostic::empty_input()],
            Err(_) => settle(Vec::new()),
        }
    }
}

fn settle(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    if diagnostics.is_empty() {
        vec![Diagnostic::clean()]
    } else {
        diagnostics
    }
}

/// Analyze a snippet with the default dispatcher.
pub fn analyze(text: &str, language: Language) -> Vec<Diagnostic> {
    DEFAULT_DISPATCHER.analyze(text, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Rule, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Analyzer that counts its invocations and finds nothing.
    struct Counting(Arc<AtomicUsize>);

    impl Analyzer for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn languages(&self) -> &'static [Language] {
            Language::ALL
        }

        fn analyze(&self, _source: &str, _language: Language) -> Vec<Diagnostic> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    #[test]
    fn test_blank_input_skips_analyzers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::empty().register(Box::new(Counting(calls.clone())));

        for text in ["", "   ", "\n\t\n"] {
            let diags = dispatcher.analyze(text, Language::JavaScript);
            assert_eq!(diags.len(), 1);
            assert_eq!(diags[0].severity, Severity::Warning);
            assert_eq!(diags[0].rule, Rule::EmptyInput);
            assert_eq!(diags[0].line, 0);
        }
        assert_eq!(dispatcher.analyze_tag(" ", "cobol")[0].rule, Rule::EmptyInput);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let diags = dispatcher.analyze("x", Language::Python);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(diags, vec![Diagnostic::clean()]);
    }

    #[test]
    fn test_unregistered_language_is_clean() {
        let dispatcher = Dispatcher::empty().register(Box::new(PythonAnalyzer));
        let diags = dispatcher.analyze("let x = 1", Language::JavaScript);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Success);
    }

    #[test]
    fn test_unknown_tag_is_clean() {
        let diags = Dispatcher::default().analyze_tag("SELECT 1", "sql");
        assert_eq!(diags, vec![Diagnostic::clean()]);
    }

    #[test]
    fn test_routes_by_language() {
        let dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.analyzer_for(Language::TypeScript).map(|a| a.name()),
            Some("javascript")
        );
        assert_eq!(
            dispatcher.analyzer_for(Language::StructuredMessage).map(|a| a.name()),
            Some("json")
        );

        let diags = dispatcher.analyze_tag("if ready\n    go()", "py");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, Rule::MissingBlockColon);
    }

    #[test]
    fn test_config_reaches_analyzers() {
        let mut config = Config::default();
        config.structured_message.expected_type = "bubble".to_string();
        let dispatcher = Dispatcher::with_config(&config);

        let diags = dispatcher.analyze(
            r#"{"type":"bubble","altText":"a"}"#,
            Language::StructuredMessage,
        );
        assert_eq!(diags, vec![Diagnostic::clean()]);
    }

    #[test]
    fn test_default_analyze_is_deterministic() {
        let text = "let a = 1\nlet b = a\nfoo(b)";
        assert_eq!(analyze(text, Language::JavaScript), analyze(text, Language::JavaScript));
    }
}
