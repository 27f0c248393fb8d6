//! Index assembly.
//!
//! [`SimpleSearch`] holds everything resolved from [`SearchOptions`] and turns
//! a [`DocumentSet`] into a [`SearchIndex`], then adds the JSON index and the
//! companion script to the set.

use serde::Serialize;
use simplesearch_core::{Config, DEFAULT_MODE, Document, DocumentSet};
use tracing::{debug, info, warn};

use crate::{
    IndexError, Result,
    asset::AssetLoader,
    directive::{FieldCleansers, UrlTransform},
    matcher::DocumentMatcher,
    options::SearchOptions,
    record::SearchRecord,
};

/// Maximum recommended size for the JSON index (500KB).
pub const MAX_INDEX_SIZE: usize = 500 * 1024;

/// Ordered list of search records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Records in document order.
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> impl Iterator<Item = &SearchRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to compact UTF-8 JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.records).map_err(IndexError::Serialization)
    }

    /// Serialize to pretty-printed UTF-8 JSON.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.records).map_err(IndexError::Serialization)
    }
}

impl FromIterator<SearchRecord> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = SearchRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Outcome of [`SimpleSearch::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of records in the index.
    pub records: usize,

    /// Size of the JSON index in bytes.
    pub json_bytes: usize,

    /// Whether the search script was added.
    pub script_emitted: bool,
}

/// Search index builder with its configuration resolved.
///
/// Directives are turned into cleansing functions and the match pattern is
/// compiled once, in [`SimpleSearch::new`]. The value is immutable afterwards
/// and can be reused for any number of runs.
#[derive(Debug, Clone)]
pub struct SimpleSearch {
    destination_json: String,
    destination_js: String,
    skip_script: bool,
    pretty: bool,
    cleansers: FieldCleansers,
    matcher: DocumentMatcher,
    transform_url: UrlTransform,
}

impl SimpleSearch {
    /// Resolve options.
    pub fn new(options: SearchOptions) -> Result<Self> {
        let matcher = DocumentMatcher::new(&options.match_pattern, &options.match_options)?;
        let cleansers = FieldCleansers::resolve(
            options
                .index
                .iter()
                .map(|(name, directive)| (name.as_str(), directive)),
        );

        debug!(
            fields = cleansers.len(),
            pattern = matcher.pattern(),
            "resolved search options"
        );

        Ok(Self {
            destination_json: options.destination_json,
            destination_js: options.destination_js,
            skip_script: options.skip_script,
            pretty: options.pretty,
            cleansers,
            matcher,
            transform_url: options.transform_url,
        })
    }

    /// Validate a loaded configuration and resolve its search options.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(SearchOptions::from(&config.search))
    }

    /// Key the JSON index is stored under.
    pub fn destination_json(&self) -> &str {
        &self.destination_json
    }

    /// Key the search script is stored under, unless skipped.
    pub fn destination_js(&self) -> Option<&str> {
        (!self.skip_script).then_some(self.destination_js.as_str())
    }

    /// Resolved cleansing functions.
    pub fn cleansers(&self) -> &FieldCleansers {
        &self.cleansers
    }

    /// Whether a document key is selected for indexing.
    pub fn is_match(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// Build the record for a single document.
    pub fn build_record(&self, document: &Document, key: &str) -> SearchRecord {
        SearchRecord::build(document, key, &self.cleansers, &self.transform_url)
    }

    /// Build records for every matching document, in collection order.
    pub fn build_index(&self, documents: &DocumentSet) -> SearchIndex {
        documents
            .iter()
            .filter(|(key, _)| {
                let matched = self.matcher.is_match(key);
                if !matched {
                    debug!(key, "not indexed");
                }
                matched
            })
            .map(|(key, document)| {
                debug!(key, "indexing document");
                self.build_record(document, key)
            })
            .collect()
    }

    /// Add the JSON index and, unless skipped, the search script to the set.
    ///
    /// The index entry is added before the script is loaded, so it is present
    /// even when loading fails. A load failure is returned as
    /// [`IndexError::Asset`].
    pub async fn run<L: AssetLoader>(
        &self,
        documents: &mut DocumentSet,
        loader: &L,
    ) -> Result<RunSummary> {
        let index = self.build_index(documents);
        let json = if self.pretty {
            index.to_json_pretty()?
        } else {
            index.to_json()?
        };

        if json.len() > MAX_INDEX_SIZE {
            warn!(
                size = json.len(),
                max = MAX_INDEX_SIZE,
                "search index exceeds recommended size"
            );
        }

        let mut summary = RunSummary {
            records: index.len(),
            json_bytes: json.len(),
            script_emitted: false,
        };

        documents.insert(
            self.destination_json.clone(),
            Document::new(json).with_mode(DEFAULT_MODE),
        );
        info!(
            records = summary.records,
            bytes = summary.json_bytes,
            dest = %self.destination_json,
            "built search index"
        );

        if self.skip_script {
            return Ok(summary);
        }

        let script = loader.load().await.map_err(|source| IndexError::Asset {
            path: loader.describe(),
            source,
        })?;
        documents.insert(
            self.destination_js.clone(),
            Document::new(script).with_mode(DEFAULT_MODE),
        );
        summary.script_emitted = true;
        info!(dest = %self.destination_js, "added search script");

        Ok(summary)
    }
}
