//! Filtering of trivial paraphrases in Portuguese PPDB dumps
//!
//! Portuguese PPDB is full of rules that only change gender, number or a
//! heading preposition (`casa` -> `casas`, `de casa` -> `casa`). These carry
//! no paraphrase information and are dropped at load time.

use crate::loader::RuleFilter;

const PREPOSITIONS: [&str; 10] = ["de", "da", "do", "das", "dos", "em", "no", "na", "nos", "nas"];

const ARTICLES: [&str; 8] = ["o", "a", "os", "as", "um", "uma", "uns", "umas"];

/// Rule filter for Portuguese
#[derive(Debug, Clone, Copy, Default)]
pub struct PortugueseFilter;

impl RuleFilter for PortugueseFilter {
    /// Remove leading articles and commas and a trailing comma
    ///
    /// Single-token expressions are kept as they are.
    fn clean(&self, mut expression: Vec<String>) -> Vec<String> {
        if expression.len() == 1 {
            return expression;
        }

        let start = expression
            .iter()
            .position(|token| !is_article(token) && token != ",")
            .unwrap_or(expression.len());
        let mut expression = expression.split_off(start);

        if expression.last().is_some_and(|token| token == ",") {
            expression.pop();
        }
        expression
    }

    /// True if the expressions differ only in gender, number or a heading
    /// or trailing preposition
    fn is_trivial(&self, lhs: &[String], rhs: &[String]) -> bool {
        let exp1 = strip_leading_preposition(lhs);
        let exp2 = strip_leading_preposition(rhs);
        if exp1.is_empty() || exp2.is_empty() {
            return true;
        }

        let exp1 = strip_trailing_preposition(exp1);
        let exp2 = strip_trailing_preposition(exp2);
        if exp1.len() != exp2.len() {
            return false;
        }

        if is_comma(exp1) || is_comma(exp2) {
            return true;
        }

        exp1.iter()
            .zip(exp2)
            .all(|(w1, w2)| same_stem(strip_inflection(w1), strip_inflection(w2)))
    }
}

fn is_article(token: &str) -> bool {
    ARTICLES.contains(&token)
}

fn is_preposition(token: &str) -> bool {
    PREPOSITIONS.contains(&token)
}

fn is_comma(expression: &[String]) -> bool {
    matches!(expression, [token] if token == ",")
}

fn strip_leading_preposition(expression: &[String]) -> &[String] {
    match expression.split_first() {
        Some((first, rest)) if is_preposition(first) => rest,
        _ => expression,
    }
}

fn strip_trailing_preposition(expression: &[String]) -> &[String] {
    match expression.split_last() {
        Some((last, rest)) if is_preposition(last) => rest,
        _ => expression,
    }
}

/// Remove a plural and/or gender ending
fn strip_inflection(word: &str) -> &str {
    if let Some(stem) = word.strip_suffix("os").or_else(|| word.strip_suffix("as")) {
        return stem;
    }
    match word.chars().last() {
        Some(c @ ('a' | 'o' | 's')) => &word[..word.len() - c.len_utf8()],
        _ => word,
    }
}

/// Stems match when equal, or when they differ only by a final l/i
/// (`animal` / `animai(s)`)
fn same_stem(w1: &str, w2: &str) -> bool {
    if w1.is_empty() || w2.is_empty() {
        return w1.is_empty() && w2.is_empty();
    }
    if w1 == w2 {
        return true;
    }
    match (w1.strip_suffix('l'), w2.strip_suffix('i')) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
