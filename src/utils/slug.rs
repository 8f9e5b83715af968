//! Key Normalization
//!
//! Converts framework and section names into lowercase slug form for the
//! string question keys used by the web form fields and debug output.
//!
//! The canonical identity for a question is the structured
//! [`QuestionId`](crate::responses::QuestionId); slugs are derived names,
//! validated for uniqueness when the catalog is constructed.

/// Normalize arbitrary text to slug form.
///
/// Alphanumeric characters are lowercased; every run of non-alphanumeric
/// characters collapses to a single `-`; leading and trailing separators are
/// trimmed. Total over any input ("" -> "").
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    out
}

/// Build the string key for a question from its framework name, section
/// name, and zero-based position within the section.
///
/// Deterministic and pure: `question_key("NIST AI RMF", "Govern", 0)` is
/// always `"nist-ai-rmf-govern-0"`.
pub fn question_key(framework: &str, section: &str, index: usize) -> String {
    format!("{}-{}-{}", slugify(framework), slugify(section), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_separates() {
        assert_eq!(slugify("NIST AI RMF"), "nist-ai-rmf");
        assert_eq!(slugify("Govern"), "govern");
    }

    #[test]
    fn test_collapses_nonalnum_runs() {
        assert_eq!(slugify("Strategy and Objective-Setting"), "strategy-and-objective-setting");
        assert_eq!(slugify("A  --  B"), "a-b");
        assert_eq!(slugify("Information, Communication, and Reporting"), "information-communication-and-reporting");
    }

    #[test]
    fn test_trims_edge_separators() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("(parenthetical)"), "parenthetical");
    }

    #[test]
    fn test_total_over_degenerate_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_question_key_is_deterministic() {
        let key = question_key("NIST AI RMF", "Govern", 0);
        assert_eq!(key, "nist-ai-rmf-govern-0");
        assert_eq!(key, question_key("NIST AI RMF", "Govern", 0));
        assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
