//! simplesearch CLI Library
//!
//! Command implementations for the `simplesearch` binary, plus the content
//! collector that turns a directory tree into a [`DocumentSet`].
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, keywords)
//! - [`collector`] - Reads a content directory into a document set
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use simplesearch::cmd;
//!
//! # async fn build() -> color_eyre::eyre::Result<()> {
//! cmd::build::run(Path::new("simplesearch.toml"), &cmd::build::BuildArgs::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod collector;

pub use collector::collect;
// Re-export core types for convenience
pub use simplesearch_core::{Config, Document, DocumentSet};
pub use simplesearch_index::{RunSummary, SearchOptions, SimpleSearch};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
