//! simplesearch Core Library
//!
//! Core types, configuration, and error handling shared by the search index
//! builder and its command-line host.

pub mod config;
pub mod document;
pub mod error;
pub mod frontmatter;

pub use config::{
    BuildConfig, Config, DEFAULT_CONFIG_FILE, FieldDirective, IndexFields, MatchOptions,
    SearchConfig,
};
pub use document::{CONTENTS_FIELD, DEFAULT_MODE, Document, DocumentSet, FieldValue};
pub use error::{CoreError, Result};
pub use frontmatter::{FrontmatterFormat, document_from_source, parse_frontmatter};
