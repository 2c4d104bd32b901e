//! ppdb: Indexed lookup of paraphrase transformation rules
//!
//! Stores rules from the Paraphrase Database (PPDB) in a token trie with a
//! middle-token index, and answers exact and partial LHS lookups.
//! Core implementation in Rust with optional Python bindings.

// Core modules
pub mod boyer_moore; // Boyer-Moore subsequence search
pub mod index; // Middle-token index for partial lookup
pub mod partial; // Partial-expression lookup and path enumeration
pub mod trie; // Rule trie, builder and read-only dictionary

// Loading PPDB dumps
pub mod bytes; // Field splitting on raw dump lines
pub mod loader; // Filtering and building from a dump
pub mod portuguese; // Portuguese triviality filter
pub mod ppdb; // PPDB dump reader

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use boyer_moore::{BoyerMoore, search};
pub use loader::{LoadError, LoadStats, LoaderOptions, NoFilter, PpdbLoader, RuleFilter, load_ppdb};
pub use partial::PartialMatch;
pub use portuguese::PortugueseFilter;
pub use ppdb::{PpdbReader, RawRule, ReaderError};
pub use trie::{SubTrie, TransformationDict, TransformationDictBuilder};
