//! Selection of the documents to index by glob pattern.

use globset::{GlobBuilder, GlobMatcher};
use simplesearch_core::MatchOptions;

use crate::{IndexError, Result};

/// Compiled match pattern for document keys.
///
/// Keys are `/`-separated relative paths. `*` never crosses a separator,
/// `**` spans any number of directories (including none) and `{a,b}`
/// alternates.
#[derive(Debug, Clone)]
pub struct DocumentMatcher {
    pattern: String,
    matcher: GlobMatcher,
    options: MatchOptions,
    /// Pattern segments spelled with a leading dot, e.g. `.archive`. Only
    /// key segments one of these accepts may start with a dot when
    /// `options.dot` is off.
    dot_segments: Vec<GlobMatcher>,
}

impl DocumentMatcher {
    /// Compile a pattern.
    pub fn new(pattern: &str, options: &MatchOptions) -> Result<Self> {
        let dot_segments = pattern
            .split('/')
            .filter(|segment| segment.starts_with('.'))
            .map(|segment| compile(segment, pattern, options))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: compile(pattern, pattern, options)?,
            options: *options,
            dot_segments,
        })
    }

    /// The pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a document key is selected.
    pub fn is_match(&self, key: &str) -> bool {
        if !self.options.dot && !self.dot_segments_allowed(key) {
            return false;
        }

        let candidate = if self.options.match_base && !self.pattern.contains('/') {
            key.rsplit('/').next().unwrap_or(key)
        } else {
            key
        };

        self.matcher.is_match(candidate)
    }

    /// Every dot-led segment of `key` must be named by the pattern.
    fn dot_segments_allowed(&self, key: &str) -> bool {
        key.split('/')
            .filter(|segment| segment.starts_with('.'))
            .all(|segment| self.dot_segments.iter().any(|m| m.is_match(segment)))
    }
}

fn compile(glob: &str, pattern: &str, options: &MatchOptions) -> Result<GlobMatcher> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .case_insensitive(options.nocase)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| IndexError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
