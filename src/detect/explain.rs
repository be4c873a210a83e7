//! Longer explanations for diagnostics.

use super::{Diagnostic, Rule};

const GENERIC: &str = "The syntax on this line does not match what the selected language \
expects. Check spelling, punctuation and the structure of the statement.";

/// Explanation for a rule.
pub fn explain_rule(rule: Rule) -> &'static str {
    match rule {
        Rule::MissingTerminator => {
            "In JavaScript and TypeScript a semicolon ends a statement. Automatic \
semicolon insertion usually fills the gap, but it can join two lines into one \
expression when the next line starts with `(`, `[` or a template literal, and \
minifiers are less forgiving than engines."
        }
        Rule::MissingBlockColon => {
            "In Python a colon ends the header of a compound statement such as `if`, \
`for`, `while`, `def` or `class`. The indented block that follows only belongs to \
the header once the colon is there; without it the interpreter raises a \
SyntaxError."
        }
        Rule::UnusedDeclaration => {
            "A variable that is declared but never read is dead code. It makes the \
snippet harder to follow and often hides a typo in the name that was meant to be \
used. Remove it or use it."
        }
        Rule::InvalidJson => {
            "The document is not valid JSON. Common causes are trailing commas, \
single-quoted strings, unquoted keys, comments, and a key with no value."
        }
        Rule::MissingDiscriminator => {
            "Structured messages are routed by a type field on the root object. \
Without the expected value the receiving platform rejects the whole message."
        }
        Rule::MissingRecommendedField => {
            "Clients that cannot render the rich message, such as notifications and \
older apps, show the alternative text instead. Leaving it out means those users \
see nothing useful."
        }
        Rule::EmptyInput | Rule::Clean => GENERIC,
    }
}

/// Explanation for a diagnostic, keyed on its rule.
pub fn explain(diagnostic: &Diagnostic) -> &'static str {
    explain_rule(diagnostic.rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_follows_rule_not_message() {
        let mut d = Diagnostic::new(Rule::MissingBlockColon, "anything at all", 3);
        assert!(explain(&d).contains("colon"));

        d.message = "missing semicolon".to_string();
        assert!(explain(&d).contains("colon ends the header"));
    }

    #[test]
    fn test_every_rule_has_text() {
        for rule in Rule::ALL {
            assert!(!explain_rule(*rule).is_empty());
        }
        assert_eq!(explain_rule(Rule::Clean), GENERIC);
    }
}
