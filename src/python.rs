//! Python bindings for ppdb
//!
//! This module provides PyO3-based Python bindings for the Rust core.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyType;
use std::sync::Arc;

use crate::boyer_moore::search;
use crate::loader::{LoadError, PpdbLoader};
use crate::portuguese::PortugueseFilter;
use crate::ppdb::ReaderError;
use crate::trie::{TransformationDict as RustTransformationDict, TransformationDictBuilder};

/// Convert LoadError to Python exception
impl From<LoadError> for PyErr {
    fn from(err: LoadError) -> PyErr {
        match &err {
            LoadError::Reader(ReaderError::Malformed { .. }) => {
                PyValueError::new_err(err.to_string())
            }
            LoadError::Reader(_) => PyIOError::new_err(err.to_string()),
        }
    }
}

fn to_owned(phrase: Vec<&str>) -> Vec<String> {
    phrase.into_iter().map(str::to_string).collect()
}

/// A read-only dictionary of paraphrase rules.
///
/// Built either from a list of (lhs, rhs) pairs or by loading a PPDB dump.
#[pyclass(name = "TransformationDict", frozen)]
#[derive(Clone)]
pub struct PyTransformationDict {
    inner: Arc<RustTransformationDict>,
}

#[pymethods]
impl PyTransformationDict {
    /// Create a dictionary from (lhs, rhs) pairs of token lists.
    #[new]
    #[pyo3(signature = (rules=Vec::new()))]
    fn new(rules: Vec<(Vec<String>, Vec<String>)>) -> Self {
        let mut builder = TransformationDictBuilder::new();
        for (lhs, rhs) in &rules {
            builder.insert(lhs, rhs);
        }
        PyTransformationDict {
            inner: Arc::new(builder.build()),
        }
    }

    /// Load a PPDB dump file.
    ///
    /// Automatically detects and handles gzip-compressed files.
    ///
    /// Args:
    ///     path: Path to the dump
    ///     language: "pt" to drop trivial Portuguese paraphrases and leading
    ///               articles, or None to keep every rule
    ///
    /// Raises:
    ///     IOError: If the file cannot be read
    ///     ValueError: If the language is not supported
    #[classmethod]
    #[pyo3(signature = (path, language=None))]
    fn load(_cls: &Bound<'_, PyType>, path: &str, language: Option<&str>) -> PyResult<Self> {
        let (dict, _) = match language {
            None => PpdbLoader::new().load_path(path)?,
            Some("pt") => PpdbLoader::new()
                .with_filter(PortugueseFilter)
                .load_path(path)?,
            Some(other) => {
                return Err(PyValueError::new_err(format!(
                    "Unsupported language: {}",
                    other
                )));
            }
        };
        Ok(PyTransformationDict {
            inner: Arc::new(dict),
        })
    }

    /// Return the right-hand sides of the rules with the given left-hand side.
    fn get_rhs(&self, lhs: Vec<String>) -> Vec<Vec<String>> {
        self.inner.get_rhs(&lhs).into_iter().map(to_owned).collect()
    }

    /// Return the right-hand sides of the rules whose left-hand side is one token.
    fn get_rhs_token(&self, token: &str) -> Vec<Vec<String>> {
        self.inner
            .get_rhs_token(token)
            .into_iter()
            .map(to_owned)
            .collect()
    }

    /// Return the part of the dictionary below the given left-hand side prefix.
    fn get_subtrie(&self, lhs: Vec<String>) -> PySubTrie {
        PySubTrie {
            inner: Arc::clone(&self.inner),
            prefix: lhs,
        }
    }

    /// Return the part of the dictionary below a one-token prefix.
    fn get_subtrie_token(&self, token: &str) -> PySubTrie {
        self.get_subtrie(vec![token.to_string()])
    }

    /// Look for left-hand sides with the partial expression inside, but not
    /// at the beginning.
    ///
    /// Returns:
    ///     List of (head, continuation) tuples
    fn find_partial_expression(&self, partial: Vec<String>) -> Vec<(Vec<String>, Vec<String>)> {
        self.inner
            .find_partial_expression(&partial)
            .into_iter()
            .map(|m| (to_owned(m.head), to_owned(m.continuation)))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "<TransformationDict rules={} nodes={}>",
            self.inner.len(),
            self.inner.node_count()
        )
    }
}

/// The rules below one left-hand side prefix.
///
/// Holds the prefix rather than a node, so it stays valid for as long as
/// Python keeps it alive. An absent prefix gives an empty subtrie.
#[pyclass(name = "SubTrie", frozen)]
#[derive(Clone)]
pub struct PySubTrie {
    inner: Arc<RustTransformationDict>,
    prefix: Vec<String>,
}

impl PySubTrie {
    fn extended(&self, path: Vec<String>) -> Self {
        let mut prefix = self.prefix.clone();
        prefix.extend(path);
        PySubTrie {
            inner: Arc::clone(&self.inner),
            prefix,
        }
    }
}

#[pymethods]
impl PySubTrie {
    /// The left-hand side prefix this subtrie was reached by.
    #[getter]
    fn prefix(&self) -> Vec<String> {
        self.prefix.clone()
    }

    /// Right-hand sides of the rules whose left-hand side is exactly the prefix.
    fn rules(&self) -> Vec<Vec<String>> {
        self.inner
            .get_rhs(&self.prefix)
            .into_iter()
            .map(to_owned)
            .collect()
    }

    /// Right-hand sides for `path` continuing the prefix.
    fn get_rhs(&self, path: Vec<String>) -> Vec<Vec<String>> {
        self.extended(path).rules()
    }

    /// Continue the lookup below this subtrie.
    fn get_subtrie(&self, path: Vec<String>) -> PySubTrie {
        self.extended(path)
    }

    /// Tokens that can follow the prefix.
    fn children(&self) -> Vec<String> {
        self.inner
            .get_subtrie(&self.prefix)
            .children()
            .into_iter()
            .map(|(token, _)| token.to_string())
            .collect()
    }

    /// Every continuation from the prefix down to a leaf.
    fn paths(&self) -> Vec<Vec<String>> {
        self.inner
            .get_subtrie(&self.prefix)
            .paths()
            .into_iter()
            .map(to_owned)
            .collect()
    }

    fn __bool__(&self) -> bool {
        !self.inner.get_subtrie(&self.prefix).is_empty()
    }

    fn __repr__(&self) -> String {
        format!("<SubTrie prefix={:?}>", self.prefix)
    }
}

/// Search list `haystack` for sublist `needle`.
///
/// Returns the index of the first occurrence, or -1 if there is none.
#[pyfunction(name = "search")]
fn py_search(haystack: Vec<String>, needle: Vec<String>) -> isize {
    search(&haystack, &needle).map_or(-1, |pos| pos as isize)
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn ppdb(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTransformationDict>()?;
    m.add_class::<PySubTrie>()?;

    m.add_function(wrap_pyfunction!(py_search, m)?)?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn dict() -> PyTransformationDict {
        PyTransformationDict::new(vec![
            (strings(&["a", "b", "c"]), strings(&["x"])),
            (strings(&["a", "d"]), strings(&["y"])),
        ])
    }

    #[test]
    fn test_subtrie_continuation() {
        let sub = dict().get_subtrie(strings(&["a"]));

        assert!(sub.__bool__());
        assert!(sub.rules().is_empty());
        assert_eq!(sub.get_rhs(strings(&["b", "c"])), vec![strings(&["x"])]);
        assert_eq!(sub.get_subtrie(strings(&["d"])).rules(), vec![strings(&["y"])]);

        let mut children = sub.children();
        children.sort();
        assert_eq!(children, strings(&["b", "d"]));

        let mut paths = sub.paths();
        paths.sort();
        assert_eq!(paths, vec![strings(&["b", "c"]), strings(&["d"])]);
    }

    #[test]
    fn test_subtrie_absent() {
        let dict = dict();
        let sub = dict.get_subtrie_token("z");

        assert!(!sub.__bool__());
        assert!(sub.paths().is_empty());
        assert!(sub.get_rhs(strings(&["a"])).is_empty());
        assert!(dict.get_subtrie_token("a").__bool__());
    }
}
