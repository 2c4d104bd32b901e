//! Inverted index of interior LHS tokens
//!
//! For every token that occurs strictly inside an inserted LHS (never first,
//! never last), the index keeps the `(before, after)` context it was seen in.
//! Partial-expression lookup starts here instead of scanning the trie.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::trie::{Phrase, Token};

/// Tokens preceding and following an interior token within one LHS
pub type Context = (Phrase, Phrase);

/// Middle-token index, written only while rules are inserted
#[derive(Debug, Clone, Default)]
pub struct MiddleTokenIndex {
    by_token: FxHashMap<Token, FxHashSet<Context>>,
}

impl MiddleTokenIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            by_token: FxHashMap::default(),
        }
    }

    /// Record the contexts of all interior tokens of `lhs`
    pub(crate) fn record(&mut self, lhs: &[Token]) {
        let len = lhs.len();
        if len < 3 {
            return;
        }

        for i in 1..len - 1 {
            let before: Phrase = lhs[..i].into();
            let after: Phrase = lhs[i + 1..].into();
            self.by_token
                .entry(lhs[i])
                .or_default()
                .insert((before, after));
        }
    }

    /// Contexts recorded for `token`, empty if it never occurred inside an LHS
    pub fn contexts(&self, token: Token) -> impl Iterator<Item = &Context> + '_ {
        self.by_token.get(&token).into_iter().flatten()
    }

    /// Number of distinct contexts recorded for `token`
    pub fn context_count(&self, token: Token) -> usize {
        self.by_token.get(&token).map_or(0, |contexts| contexts.len())
    }

    /// Number of distinct interior tokens
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasso::Rodeo;

    fn phrase(rodeo: &mut Rodeo, tokens: &[&str]) -> Phrase {
        tokens.iter().map(|t| rodeo.get_or_intern(t)).collect()
    }

    #[test]
    fn test_record_interior_only() {
        let mut rodeo = Rodeo::default();
        let lhs = phrase(&mut rodeo, &["a", "b", "c", "d"]);
        let mut index = MiddleTokenIndex::new();
        index.record(&lhs);

        let a = rodeo.get_or_intern("a");
        let b = rodeo.get_or_intern("b");
        let c = rodeo.get_or_intern("c");
        let d = rodeo.get_or_intern("d");

        assert_eq!(index.len(), 2);
        assert_eq!(index.context_count(a), 0);
        assert_eq!(index.context_count(d), 0);

        let b_contexts: Vec<_> = index.contexts(b).collect();
        assert_eq!(b_contexts.len(), 1);
        assert_eq!(&*b_contexts[0].0, &[a]);
        assert_eq!(&*b_contexts[0].1, &[c, d]);

        let c_contexts: Vec<_> = index.contexts(c).collect();
        assert_eq!(&*c_contexts[0].0, &[a, b]);
        assert_eq!(&*c_contexts[0].1, &[d]);
    }

    #[test]
    fn test_short_lhs_not_indexed() {
        let mut rodeo = Rodeo::default();
        let mut index = MiddleTokenIndex::new();
        index.record(&phrase(&mut rodeo, &["a"]));
        index.record(&phrase(&mut rodeo, &["a", "b"]));
        index.record(&[]);

        assert!(index.is_empty());
    }

    #[test]
    fn test_contexts_merge_duplicates() {
        let mut rodeo = Rodeo::default();
        let mut index = MiddleTokenIndex::new();
        index.record(&phrase(&mut rodeo, &["a", "b", "c"]));
        index.record(&phrase(&mut rodeo, &["a", "b", "c"]));
        index.record(&phrase(&mut rodeo, &["x", "b", "c"]));

        let b = rodeo.get_or_intern("b");
        assert_eq!(index.context_count(b), 2);
    }

    #[test]
    fn test_contexts_absent_token() {
        let mut rodeo = Rodeo::default();
        let index = MiddleTokenIndex::new();
        let z = rodeo.get_or_intern("z");

        assert_eq!(index.contexts(z).count(), 0);
    }
}
