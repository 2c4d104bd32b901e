//! Partial-expression lookup
//!
//! Finds rules whose LHS contains a given token sequence somewhere after its
//! first token. Candidates come from the middle-token index; each accepted
//! candidate is completed by enumerating every path below the matched node.

use crate::trie::{NodeId, ROOT, Token, TransformationDict};

/// One completion of a partial expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartialMatch<'a> {
    /// LHS tokens preceding the partial expression
    pub head: Vec<&'a str>,
    /// Tokens following the partial expression down to a leaf of the trie
    pub continuation: Vec<&'a str>,
}

impl TransformationDict {
    /// Look for LHS rules with `partial` inside, but not at the beginning
    ///
    /// Returns one `PartialMatch` per accepted LHS head and per path from the
    /// matched node down to a leaf. A matched node without children yields a
    /// single match with an empty continuation.
    ///
    /// A context is accepted when its `after` part, truncated to one more
    /// token than the tail of `partial`, equals that tail. Because the
    /// truncated slice may be longer than the tail, this only holds when
    /// `after` is exactly the tail.
    pub fn find_partial_expression<S: AsRef<str>>(&self, partial: &[S]) -> Vec<PartialMatch<'_>> {
        let Some((first, tail)) = partial.split_first() else {
            return Vec::new();
        };
        let Some(first) = self.token(first.as_ref()) else {
            return Vec::new();
        };
        // A tail token that was never interned cannot appear in any context
        let Some(tail) = tail
            .iter()
            .map(|token| self.token(token.as_ref()))
            .collect::<Option<Vec<Token>>>()
        else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for (before, after) in self.index().contexts(first) {
            let end = after.len().min(tail.len() + 1);
            if after[..end] != tail[..] {
                continue;
            }

            let node = self
                .walk_tokens(ROOT, before)
                .and_then(|id| self.walk_tokens(id, &[first]))
                .and_then(|id| self.walk_tokens(id, &tail));
            let Some(node) = node else {
                continue;
            };

            let head = self.resolve_phrase(before);
            for path in leaf_paths(self, node) {
                matches.push(PartialMatch {
                    head: head.clone(),
                    continuation: self.resolve_phrase(&path),
                });
            }
        }

        matches
    }
}

/// Depth-first enumeration of every path from `start` down to a leaf
///
/// A leaf `start` gives one empty path.
pub(crate) fn leaf_paths(dict: &TransformationDict, start: NodeId) -> Vec<Vec<Token>> {
    let mut paths = Vec::new();
    let mut stack: Vec<(NodeId, Vec<Token>)> = vec![(start, Vec::new())];

    while let Some((id, path)) = stack.pop() {
        let node = dict.node(id);
        if node.children.is_empty() {
            paths.push(path);
            continue;
        }
        for (&token, &child) in &node.children {
            let mut next = path.clone();
            next.push(token);
            stack.push((child, next));
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::TransformationDictBuilder;

    fn build(rules: &[(&[&str], &[&str])]) -> TransformationDict {
        let mut builder = TransformationDictBuilder::new();
        for &(lhs, rhs) in rules {
            builder.insert(lhs, rhs);
        }
        builder.build()
    }

    fn sorted(mut matches: Vec<PartialMatch<'_>>) -> Vec<PartialMatch<'_>> {
        matches.sort();
        matches
    }

    #[test]
    fn test_single_token_partial_rejected_by_length_check() {
        // after = ("c",) truncated to 1 token is compared with an empty tail
        let dict = build(&[(&["a", "b", "c"], &["y"])]);

        assert!(dict.find_partial_expression(&["b"]).is_empty());
    }

    #[test]
    fn test_partial_reaching_leaf() {
        let dict = build(&[(&["a", "b", "c"], &["y"])]);

        let matches = dict.find_partial_expression(&["b", "c"]);
        assert_eq!(
            matches,
            vec![PartialMatch {
                head: vec!["a"],
                continuation: vec![],
            }]
        );
    }

    #[test]
    fn test_partial_with_continuation() {
        let dict = build(&[(&["a", "b", "c"], &["y"]), (&["a", "b", "c", "d"], &["z"])]);

        // ("a", "b", "c", "d") has after = ("c", "d"), which the check rejects;
        // ("a", "b", "c") is accepted and its node continues with "d"
        let matches = dict.find_partial_expression(&["b", "c"]);
        assert_eq!(
            matches,
            vec![PartialMatch {
                head: vec!["a"],
                continuation: vec!["d"],
            }]
        );
    }

    #[test]
    fn test_partial_multiple_paths() {
        let dict = build(&[
            (&["a", "b", "c"], &["y"]),
            (&["a", "b", "c", "d", "e"], &["z"]),
            (&["a", "b", "c", "f"], &["w"]),
        ]);

        let matches = sorted(dict.find_partial_expression(&["b", "c"]));
        assert_eq!(
            matches,
            vec![
                PartialMatch {
                    head: vec!["a"],
                    continuation: vec!["d", "e"],
                },
                PartialMatch {
                    head: vec!["a"],
                    continuation: vec!["f"],
                },
            ]
        );
    }

    #[test]
    fn test_partial_multiple_heads() {
        let dict = build(&[
            (&["a", "b", "c"], &["y"]),
            (&["x", "w", "b", "c"], &["z"]),
        ]);

        let matches = sorted(dict.find_partial_expression(&["b", "c"]));
        assert_eq!(
            matches,
            vec![
                PartialMatch {
                    head: vec!["a"],
                    continuation: vec![],
                },
                PartialMatch {
                    head: vec!["x", "w"],
                    continuation: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_partial_longer_expression() {
        let dict = build(&[(&["o", "poder", "de", "veto", "presidencial"], &["veto"])]);

        let matches = dict.find_partial_expression(&["de", "veto", "presidencial"]);
        assert_eq!(
            matches,
            vec![PartialMatch {
                head: vec!["o", "poder"],
                continuation: vec![],
            }]
        );
    }

    #[test]
    fn test_partial_first_token_not_interior() {
        let dict = build(&[(&["a", "b", "c"], &["y"])]);

        assert!(dict.find_partial_expression(&["a", "b", "c"]).is_empty());
        assert!(dict.find_partial_expression(&["c"]).is_empty());
    }

    #[test]
    fn test_partial_unknown_tokens() {
        let dict = build(&[(&["a", "b", "c"], &["y"])]);

        assert!(dict.find_partial_expression(&["q"]).is_empty());
        assert!(dict.find_partial_expression(&["b", "q"]).is_empty());
    }

    #[test]
    fn test_partial_empty_input() {
        let dict = build(&[(&["a", "b", "c"], &["y"])]);

        assert!(dict.find_partial_expression::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_leaf_paths_from_root() {
        let dict = build(&[(&["a", "b"], &["x"]), (&["a", "c"], &["y"]), (&["d"], &["z"])]);

        let mut paths: Vec<Vec<&str>> = leaf_paths(&dict, ROOT)
            .iter()
            .map(|path| dict.resolve_phrase(path))
            .collect();
        paths.sort();
        assert_eq!(paths, vec![vec!["a", "b"], vec!["a", "c"], vec!["d"]]);
    }
}
