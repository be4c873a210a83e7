//! Line-level auto-fixes.
//!
//! Fixes are computed from the line text captured when the diagnostic was
//! produced, not from the current buffer. Callers must pass diagnostics that
//! were computed from the same text they hand in here; after any edit the
//! old diagnostics are stale and the snippet has to be analyzed again.

use crate::detect::Diagnostic;

/// Result of a bulk fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFix {
    pub text: String,
    /// Number of patched lines. Zero means there was nothing to fix.
    pub applied: usize,
}

/// Apply the fix carried by one diagnostic.
///
/// Returns the text unchanged when the diagnostic is not fixable or its
/// line is outside the text.
pub fn apply_single_fix(text: &str, diagnostic: &Diagnostic) -> String {
    apply_bulk_fix(text, std::slice::from_ref(diagnostic)).text
}

/// Apply every applicable fix in `diagnostics`.
///
/// Lines are split and rejoined on `\n`, so untouched lines (and a trailing
/// newline) come back byte-for-byte.
pub fn apply_bulk_fix(text: &str, diagnostics: &[Diagnostic]) -> BulkFix {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut applied = 0;

    for diagnostic in diagnostics {
        if let Some(fix) = &diagnostic.fix {
            if diagnostic.line == 0 || diagnostic.line > lines.len() {
                continue;
            }
            lines[diagnostic.line - 1] = fix.patched_line();
            applied += 1;
        }
    }

    BulkFix {
        text: lines.join("\n"),
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{FixKind, Rule};

    fn terminator(line: usize, original: &str) -> Diagnostic {
        Diagnostic::fixable(
            Rule::MissingTerminator,
            "missing",
            line,
            FixKind::AppendSemicolon,
            original,
        )
    }

    #[test]
    fn test_single_fix_appends_to_captured_line() {
        let text = "function f() {\n  let r = 1\n}\n";
        let fixed = apply_single_fix(text, &terminator(2, "  let r = 1"));
        assert_eq!(fixed, "function f() {\n  let r = 1;\n}\n");
    }

    #[test]
    fn test_single_fix_uses_captured_text_not_buffer() {
        let fixed = apply_single_fix("a\nchanged\nc", &terminator(2, "b"));
        assert_eq!(fixed, "a\nb;\nc");
    }

    #[test]
    fn test_single_fix_colon() {
        let d = Diagnostic::fixable(
            Rule::MissingBlockColon,
            "missing",
            1,
            FixKind::AppendColon,
            "if x",
        );
        assert_eq!(apply_single_fix("if x\n    y()", &d), "if x:\n    y()");
    }

    #[test]
    fn test_single_fix_noops() {
        let text = "a\nb";
        assert_eq!(apply_single_fix(text, &terminator(3, "c")), text);

        let mut zero = terminator(1, "a");
        zero.line = 0;
        assert_eq!(apply_single_fix(text, &zero), text);

        let info = Diagnostic::new(Rule::UnusedDeclaration, "unused", 1);
        assert_eq!(apply_single_fix(text, &info), text);
    }

    #[test]
    fn test_bulk_fix_counts_applicable() {
        let text = "let a = 1\nlet b = 2\nlet c = 3";
        let diags = vec![
            terminator(1, "let a = 1"),
            Diagnostic::new(Rule::UnusedDeclaration, "unused", 2),
            terminator(3, "let c = 3"),
            terminator(9, "nope"),
        ];
        let result = apply_bulk_fix(text, &diags);
        assert_eq!(result.applied, 2);
        assert_eq!(result.text, "let a = 1;\nlet b = 2\nlet c = 3;");
    }

    #[test]
    fn test_bulk_fix_nothing_to_do() {
        let result = apply_bulk_fix("x", &[Diagnostic::clean()]);
        assert_eq!(result, BulkFix { text: "x".to_string(), applied: 0 });
    }
}
