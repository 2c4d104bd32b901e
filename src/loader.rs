//! Building a `TransformationDict` from a PPDB dump
//!
//! The loader streams rules from a `PpdbReader`, passes each side through a
//! `RuleFilter` and inserts whatever survives. Callers own the resulting
//! dictionary; nothing is cached between loads.

use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

use crate::ppdb::{PpdbReader, ReaderError};
use crate::trie::{TransformationDict, TransformationDictBuilder};

/// Error while loading a dictionary
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Load error: {0}")]
    Reader(#[from] ReaderError),
}

/// Language-specific cleanup and filtering of rules
pub trait RuleFilter {
    /// Normalize one side of a rule, e.g. by dropping leading articles
    fn clean(&self, expression: Vec<String>) -> Vec<String> {
        expression
    }

    /// Should the rule be ignored as a trivial paraphrase?
    fn is_trivial(&self, _lhs: &[String], _rhs: &[String]) -> bool {
        false
    }
}

/// Keeps every rule unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl RuleFilter for NoFilter {}

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Log and skip malformed lines instead of aborting the load
    pub skip_malformed: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            skip_malformed: true,
        }
    }
}

/// What happened to each line of the dump
///
/// Every line lands in exactly one of `read`, `malformed`, `damaged`,
/// `invalid_utf8` or `blank`; see `LoadStats::accounted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines in the dump
    pub lines: usize,
    /// Rules parsed from the dump
    pub read: usize,
    /// Rules added to the dictionary
    pub inserted: usize,
    /// Rules that were already present
    pub duplicate: usize,
    /// Rules with an empty side after cleaning
    pub empty: usize,
    /// Rules rejected by the filter
    pub trivial: usize,
    /// Lines that could not be split into fields
    pub malformed: usize,
    /// Lines skipped because of encoding damage
    pub damaged: usize,
    /// Lines skipped because a side is not valid UTF-8
    pub invalid_utf8: usize,
    /// Empty lines
    pub blank: usize,
}

impl LoadStats {
    /// Number of lines with a known outcome, equal to `lines` after a load
    pub fn accounted(&self) -> usize {
        self.read + self.malformed + self.damaged + self.invalid_utf8 + self.blank
    }
}

/// Builds dictionaries from PPDB dumps
#[derive(Debug, Clone, Default)]
pub struct PpdbLoader<F = NoFilter> {
    filter: F,
    options: LoaderOptions,
}

impl PpdbLoader<NoFilter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: RuleFilter> PpdbLoader<F> {
    /// Replace the rule filter
    pub fn with_filter<G: RuleFilter>(self, filter: G) -> PpdbLoader<G> {
        PpdbLoader {
            filter,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load a dump file (plain or gzip)
    pub fn load_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(TransformationDict, LoadStats), LoadError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading PPDB rules");
        let reader = PpdbReader::from_path(path)?;
        self.load_reader(reader)
    }

    /// Load all rules from an open reader
    pub fn load_reader<R: BufRead>(
        &self,
        mut reader: PpdbReader<R>,
    ) -> Result<(TransformationDict, LoadStats), LoadError> {
        let mut builder = TransformationDictBuilder::new();
        let mut stats = LoadStats::default();

        for result in reader.by_ref() {
            let rule = match result {
                Ok(rule) => rule,
                Err(e @ ReaderError::Malformed { .. }) if self.options.skip_malformed => {
                    tracing::warn!("{}", e);
                    stats.malformed += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            stats.read += 1;

            let lhs = self.filter.clean(rule.lhs);
            let rhs = self.filter.clean(rule.rhs);
            if lhs.is_empty() || rhs.is_empty() {
                stats.empty += 1;
                continue;
            }

            if self.filter.is_trivial(&lhs, &rhs) {
                stats.trivial += 1;
                continue;
            }

            if builder.insert(&lhs, &rhs) {
                stats.inserted += 1;
            } else {
                stats.duplicate += 1;
            }
        }
        stats.lines = reader.line_num();
        stats.damaged = reader.damaged();
        stats.invalid_utf8 = reader.invalid_utf8();
        stats.blank = reader.blank();

        tracing::info!(
            rules = stats.inserted,
            nodes = builder.node_count(),
            trivial = stats.trivial,
            malformed = stats.malformed,
            damaged = stats.damaged,
            invalid_utf8 = stats.invalid_utf8,
            "finished loading PPDB rules"
        );

        Ok((builder.build(), stats))
    }
}

/// Load a dump with no filtering and default options
pub fn load_ppdb(path: impl AsRef<Path>) -> Result<TransformationDict, LoadError> {
    PpdbLoader::new().load_path(path).map(|(dict, _)| dict)
}
