//! Core trait for language analyzers.

use super::{Diagnostic, Language};

/// Language-specific analyzer trait.
///
/// Each language family implements this trait to turn raw text into
/// diagnostics. Implementations are pure: the same input always yields
/// the same diagnostics in the same order.
pub trait Analyzer: Send + Sync {
    /// A short name identifying this analyzer (e.g., "javascript").
    fn name(&self) -> &'static str;

    /// Languages this analyzer handles.
    fn languages(&self) -> &'static [Language];

    /// Analyze a snippet written in `language`.
    ///
    /// An empty result means nothing was found; the dispatcher turns that
    /// into a success diagnostic.
    fn analyze(&self, source: &str, language: Language) -> Vec<Diagnostic>;

    /// Check if this analyzer handles the given language.
    fn handles(&self, language: Language) -> bool {
        self.languages().contains(&language)
    }
}
