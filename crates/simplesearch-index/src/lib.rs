//! simplesearch Index Library
//!
//! Builds a client-side search index for a static site: selected documents
//! are reduced to flat records of normalized keyword strings and serialized
//! to JSON, next to a small search script that consumes them.
//!
//! # Example
//!
//! ```no_run
//! use simplesearch_core::{Document, DocumentSet};
//! use simplesearch_index::{FsAssetLoader, SearchOptions, SimpleSearch};
//!
//! # async fn build() -> simplesearch_index::Result<()> {
//! let mut documents = DocumentSet::new();
//! documents.insert(
//!     "index.html",
//!     Document::new("<p>Main Index</p>").with_field("title", "Main index"),
//! );
//!
//! let search = SimpleSearch::new(SearchOptions::default())?;
//! search.run(&mut documents, &FsAssetLoader::bundled()).await?;
//! assert!(documents.contains("search.json"));
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod directive;
pub mod indexer;
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod options;
pub mod record;

pub use asset::{AssetLoader, BUNDLED_SCRIPT, FsAssetLoader};
pub use directive::{CleanseFn, Cleanser, Directive, FieldCleansers, UrlTransform};
pub use indexer::{MAX_INDEX_SIZE, RunSummary, SearchIndex, SimpleSearch};
pub use keywords::make_keywords;
pub use matcher::DocumentMatcher;
pub use normalize::{strip_html, strip_markdown};
pub use options::SearchOptions;
pub use record::{SearchRecord, URL_FIELD};
use thiserror::Error;

/// Search index errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The match pattern is not a valid glob.
    #[error("invalid match pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The index could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The companion search script could not be read.
    #[error("failed to read search script {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error(transparent)]
    Core(#[from] simplesearch_core::CoreError),
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
