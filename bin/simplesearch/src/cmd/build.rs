//! Build command - generates the search index for a content directory

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use simplesearch_core::{Config, Document};
use simplesearch_index::{FsAssetLoader, RunSummary, SimpleSearch};

use crate::collector;

/// Command-line overrides for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Content directory, overriding `build.content_dir`.
    pub input: Option<PathBuf>,
    /// Output directory, overriding `build.output_dir`.
    pub output: Option<PathBuf>,
    /// Pretty-print the JSON index.
    pub pretty: bool,
    /// Do not emit the search script.
    pub no_script: bool,
}

/// Run the build command.
///
/// Collects the content directory, runs the indexer over it and writes the
/// generated artifacts to the output directory. Content files themselves
/// are not copied.
pub async fn run(config_path: &Path, args: &BuildArgs) -> Result<RunSummary> {
    let start = Instant::now();
    tracing::info!(?config_path, ?args, "Starting build");

    let mut config = Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;

    if let Some(input) = &args.input {
        config.build.content_dir.clone_from(input);
    }
    if let Some(output) = &args.output {
        config.build.output_dir.clone_from(output);
    }
    config.search.pretty |= args.pretty;
    config.search.skip_script |= args.no_script;

    tracing::debug!(?config, "Loaded configuration");

    let search = SimpleSearch::from_config(&config).wrap_err("Invalid search configuration")?;
    let mut documents = collector::collect(&config.build.content_dir)
        .wrap_err("Failed to collect content")?;

    let loader = config
        .build
        .script_asset
        .as_ref()
        .map_or_else(FsAssetLoader::bundled, FsAssetLoader::new);

    let summary = search
        .run(&mut documents, &loader)
        .await
        .wrap_err("Failed to build search index")?;

    let output = &config.build.output_dir;
    let mut artifacts = vec![search.destination_json()];
    artifacts.extend(search.destination_js());

    for key in artifacts {
        let document = documents
            .get(key)
            .ok_or_else(|| eyre!("Generated artifact {key} is missing"))?;
        write_artifact(output, key, document).await?;
    }

    let duration = start.elapsed();

    println!();
    println!("  Search index built successfully!");
    println!();
    println!("  Records:    {}", summary.records);
    println!("  Index size: {} bytes", summary.json_bytes);
    println!(
        "  Script:     {}",
        if summary.script_emitted { "emitted" } else { "skipped" }
    );
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(?summary, ?duration, "Build completed successfully");

    Ok(summary)
}

/// Write one generated document below `output`.
async fn write_artifact(output: &Path, key: &str, document: &Document) -> Result<()> {
    let path = output.join(key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(&path, document.contents())
        .await
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    if let Some(mode) = document.mode.as_deref() {
        apply_mode(&path, mode).await?;
    }

    tracing::debug!(path = %path.display(), "wrote artifact");
    Ok(())
}

#[cfg(unix)]
async fn apply_mode(path: &Path, mode: &str) -> Result<()> {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};

    let bits = u32::from_str_radix(mode, 8)
        .wrap_err_with(|| format!("Invalid file mode {mode:?} for {}", path.display()))?;
    tokio::fs::set_permissions(path, Permissions::from_mode(bits))
        .await
        .wrap_err_with(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
async fn apply_mode(_path: &Path, _mode: &str) -> Result<()> {
    Ok(())
}
