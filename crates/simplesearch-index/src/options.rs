//! Runtime options for building a search index.

use simplesearch_core::{MatchOptions, SearchConfig};

use crate::directive::{Directive, UrlTransform};

/// Options for [`SimpleSearch`](crate::SimpleSearch).
///
/// Unlike [`SearchConfig`] these may carry closures, for custom cleansing
/// functions and URL transforms.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Key of the generated JSON index.
    pub destination_json: String,

    /// Key of the copied companion search script.
    pub destination_js: String,

    /// Do not emit the companion search script.
    pub skip_script: bool,

    /// Fields to index, in output order.
    pub index: Vec<(String, Directive)>,

    /// Glob pattern selecting the documents to index.
    pub match_pattern: String,

    /// Options for the glob pattern.
    pub match_options: MatchOptions,

    /// Turns a document key into a URL.
    pub transform_url: UrlTransform,

    /// Pretty-print the JSON index.
    pub pretty: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            destination_json: config.destination_json.clone(),
            destination_js: config.destination_js.clone(),
            skip_script: config.skip_script,
            index: config
                .index
                .iter()
                .map(|(name, directive)| (name.to_string(), Directive::from(directive)))
                .collect(),
            match_pattern: config.match_pattern.clone(),
            match_options: config.match_options,
            transform_url: UrlTransform::Prefix(config.url_prefix.clone()),
            pretty: config.pretty,
        }
    }
}

impl SearchOptions {
    /// Set the key of the JSON index.
    #[must_use]
    pub fn with_destination_json(mut self, key: impl Into<String>) -> Self {
        self.destination_json = key.into();
        self
    }

    /// Set the key of the search script.
    #[must_use]
    pub fn with_destination_js(mut self, key: impl Into<String>) -> Self {
        self.destination_js = key.into();
        self
    }

    /// Skip emitting the search script.
    #[must_use]
    pub fn without_script(mut self) -> Self {
        self.skip_script = true;
        self
    }

    /// Replace all field directives.
    #[must_use]
    pub fn with_index<I, K, D>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<Directive>,
    {
        self.index = fields
            .into_iter()
            .map(|(name, directive)| (name.into(), directive.into()))
            .collect();
        self
    }

    /// Set the match pattern.
    #[must_use]
    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = pattern.into();
        self
    }

    /// Set the match options.
    #[must_use]
    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.match_options = options;
        self
    }

    /// Set the URL transform.
    #[must_use]
    pub fn with_transform_url(mut self, transform: UrlTransform) -> Self {
        self.transform_url = transform;
        self
    }

    /// Pretty-print the JSON index.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
