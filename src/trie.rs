//! Prefix trie of transformation rules
//!
//! Rules are stored in an arena of nodes addressed by `NodeId`. Each node
//! holds the RHS alternatives whose LHS ends at that node and a map from the
//! next token to the child node. Tokens are interned, so the arena only ever
//! stores `Spur` keys.
//!
//! Building and querying are separate phases: `TransformationDictBuilder`
//! accepts insertions, `build()` freezes it into an immutable
//! `TransformationDict` that can be shared across threads.

use lasso::{Rodeo, RodeoReader, Spur};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use crate::index::MiddleTokenIndex;
use crate::partial::leaf_paths;

/// Interned token
pub type Token = Spur;

/// Immutable token sequence
pub type Phrase = Box<[Token]>;

/// Index of a node in the trie arena
pub type NodeId = usize;

/// The root node is always the first node in the arena
pub const ROOT: NodeId = 0;

/// A node in the rule trie
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    /// RHS alternatives for the LHS ending here
    pub(crate) rules: FxHashSet<Phrase>,
    /// Next token -> child node
    pub(crate) children: FxHashMap<Token, NodeId>,
}

/// Mutable build phase of a `TransformationDict`
pub struct TransformationDictBuilder {
    nodes: Vec<Node>,
    index: MiddleTokenIndex,
    interner: Rodeo<Spur, FxBuildHasher>,
    rule_count: usize,
}

impl TransformationDictBuilder {
    /// Create a builder holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            index: MiddleTokenIndex::new(),
            interner: Rodeo::with_hasher(FxBuildHasher),
            rule_count: 0,
        }
    }

    /// Add a transformation rule
    ///
    /// Walks (and grows) the path for `lhs`, records every interior token of
    /// `lhs` in the middle-token index and adds `rhs` to the final node.
    /// An empty `lhs` is ignored. Returns `true` if the rule was not already
    /// present.
    pub fn insert<L, R>(&mut self, lhs: &[L], rhs: &[R]) -> bool
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        if lhs.is_empty() {
            return false;
        }

        let lhs: Phrase = lhs
            .iter()
            .map(|token| self.interner.get_or_intern(token.as_ref()))
            .collect();
        let rhs: Phrase = rhs
            .iter()
            .map(|token| self.interner.get_or_intern(token.as_ref()))
            .collect();

        let mut current = ROOT;
        for &token in lhs.iter() {
            current = self.child_or_insert(current, token);
        }
        self.index.record(&lhs);

        let added = self.nodes[current].rules.insert(rhs);
        if added {
            self.rule_count += 1;
        }
        added
    }

    fn child_or_insert(&mut self, parent: NodeId, token: Token) -> NodeId {
        if let Some(&child) = self.nodes[parent].children.get(&token) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[parent].children.insert(token, child);
        child
    }

    /// Number of distinct (LHS, RHS) rules inserted so far
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Number of trie nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Freeze the builder into a read-only dictionary
    pub fn build(self) -> TransformationDict {
        TransformationDict {
            nodes: self.nodes,
            index: self.index,
            tokens: self.interner.into_reader(),
            rule_count: self.rule_count,
        }
    }
}

impl Default for TransformationDictBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransformationDictBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationDictBuilder")
            .field("rules", &self.rule_count)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<L, R> FromIterator<(L, R)> for TransformationDict
where
    L: AsRef<[String]>,
    R: AsRef<[String]>,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut builder = TransformationDictBuilder::new();
        for (lhs, rhs) in iter {
            builder.insert(lhs.as_ref(), rhs.as_ref());
        }
        builder.build()
    }
}

/// Read-only dictionary of phrasal transformation rules
///
/// Lookups never fail: a path that was never inserted yields an empty set
/// or an empty `SubTrie`.
pub struct TransformationDict {
    nodes: Vec<Node>,
    index: MiddleTokenIndex,
    tokens: RodeoReader<Spur, FxBuildHasher>,
    rule_count: usize,
}

impl TransformationDict {
    /// Number of distinct (LHS, RHS) rules
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Number of trie nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The middle-token index built alongside the trie
    pub(crate) fn index(&self) -> &MiddleTokenIndex {
        &self.index
    }

    /// `(before, after)` contexts in which `token` occurs inside some LHS
    ///
    /// Empty when the token never occurs strictly inside an LHS.
    pub fn contexts(&self, token: &str) -> Vec<(Vec<&str>, Vec<&str>)> {
        let Some(token) = self.token(token) else {
            return Vec::new();
        };
        self.index
            .contexts(token)
            .map(|(before, after)| (self.resolve_phrase(before), self.resolve_phrase(after)))
            .collect()
    }

    /// All RHS alternatives for the given LHS sequence
    pub fn get_rhs<S: AsRef<str>>(&self, lhs: &[S]) -> FxHashSet<Vec<&str>> {
        self.get_subtrie(lhs).rules()
    }

    /// All RHS alternatives for a one-token LHS
    pub fn get_rhs_token(&self, token: &str) -> FxHashSet<Vec<&str>> {
        self.get_subtrie_token(token).rules()
    }

    /// Subtrie reached by following `lhs` from the root
    pub fn get_subtrie<S: AsRef<str>>(&self, lhs: &[S]) -> SubTrie<'_> {
        self.root().get_subtrie(lhs)
    }

    /// Subtrie reached by a single token from the root
    pub fn get_subtrie_token(&self, token: &str) -> SubTrie<'_> {
        self.root().get_subtrie(&[token])
    }

    /// The whole trie as a `SubTrie`
    pub fn root(&self) -> SubTrie<'_> {
        SubTrie {
            dict: self,
            node: Some(ROOT),
        }
    }

    /// Look up an interned token without interning it
    pub(crate) fn token(&self, token: &str) -> Option<Token> {
        self.tokens.get(token)
    }

    pub(crate) fn resolve(&self, token: &Token) -> &str {
        self.tokens.resolve(token)
    }

    pub(crate) fn resolve_phrase(&self, phrase: &[Token]) -> Vec<&str> {
        phrase.iter().map(|token| self.resolve(token)).collect()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follow interned tokens from `from`; `None` as soon as a step is missing
    pub(crate) fn walk_tokens(&self, from: NodeId, path: &[Token]) -> Option<NodeId> {
        path.iter()
            .try_fold(from, |id, token| self.nodes[id].children.get(token).copied())
    }

    /// Follow string tokens from `from` without interning anything
    fn walk<S: AsRef<str>>(&self, from: NodeId, path: &[S]) -> Option<NodeId> {
        path.iter().try_fold(from, |id, token| {
            let token = self.token(token.as_ref())?;
            self.nodes[id].children.get(&token).copied()
        })
    }
}

impl std::fmt::Debug for TransformationDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationDict")
            .field("rules", &self.rule_count)
            .field("nodes", &self.nodes.len())
            .field("middle_tokens", &self.index.len())
            .finish_non_exhaustive()
    }
}

/// Handle on the subtree below some LHS prefix
///
/// An absent prefix gives an empty handle with no rules and no children.
#[derive(Debug, Clone, Copy)]
pub struct SubTrie<'a> {
    dict: &'a TransformationDict,
    node: Option<NodeId>,
}

impl<'a> SubTrie<'a> {
    /// True when the handle has neither rules nor children
    pub fn is_empty(&self) -> bool {
        match self.node {
            Some(id) => {
                let node = self.dict.node(id);
                node.rules.is_empty() && node.children.is_empty()
            }
            None => true,
        }
    }

    /// RHS alternatives stored at this node
    pub fn rules(&self) -> FxHashSet<Vec<&'a str>> {
        let dict = self.dict;
        match self.node {
            Some(id) => dict
                .node(id)
                .rules
                .iter()
                .map(|rhs| dict.resolve_phrase(rhs))
                .collect(),
            None => FxHashSet::default(),
        }
    }

    /// Next tokens and the subtries they lead to
    pub fn children(&self) -> Vec<(&'a str, SubTrie<'a>)> {
        let dict = self.dict;
        match self.node {
            Some(id) => dict
                .node(id)
                .children
                .iter()
                .map(|(token, &child)| {
                    (
                        dict.resolve(token),
                        SubTrie {
                            dict,
                            node: Some(child),
                        },
                    )
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Continue the lookup below this node
    pub fn get_subtrie<S: AsRef<str>>(&self, path: &[S]) -> SubTrie<'a> {
        SubTrie {
            dict: self.dict,
            node: self.node.and_then(|id| self.dict.walk(id, path)),
        }
    }

    /// RHS alternatives for `path` relative to this node
    pub fn get_rhs<S: AsRef<str>>(&self, path: &[S]) -> FxHashSet<Vec<&'a str>> {
        self.get_subtrie(path).rules()
    }

    /// Every maximal downward path from this node to a leaf
    ///
    /// A leaf yields a single empty path; an empty handle yields none.
    pub fn paths(&self) -> Vec<Vec<&'a str>> {
        let dict = self.dict;
        match self.node {
            Some(id) => leaf_paths(dict, id)
                .iter()
                .map(|path| dict.resolve_phrase(path))
                .collect(),
            None => Vec::new(),
        }
    }
}
