//! simplesearch CLI
//!
//! Builds a client-side keyword search index for a static site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use simplesearch::cmd::{build::BuildArgs, keywords::Mode};
use simplesearch_core::DEFAULT_CONFIG_FILE;

/// Command-line interface for simplesearch.
#[derive(Parser)]
#[command(
    name = "simplesearch",
    version,
    about = "Build a client-side keyword search index for a static site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the search index and copy the search script
    Build {
        /// Content directory (overrides build.content_dir)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output directory (overrides build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON index
        #[arg(long)]
        pretty: bool,
        /// Do not emit the search script
        #[arg(long)]
        no_script: bool,
    },
    /// Print the keyword string produced for a piece of text
    Keywords {
        /// Text to cleanse (reads standard input when omitted)
        text: Option<String>,
        /// Cleansing mode
        #[arg(short, long, value_enum, default_value_t = Mode::Keywords)]
        mode: Mode,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    simplesearch::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            pretty,
            no_script,
        } => {
            let args = BuildArgs {
                input,
                output,
                pretty,
                no_script,
            };
            simplesearch::cmd::build::run(&cli.config, &args).await?;
        }
        Commands::Keywords { text, mode } => {
            simplesearch::cmd::keywords::run(text.as_deref(), mode)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["simplesearch", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("simplesearch.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                input,
                output,
                pretty,
                no_script,
            } => {
                assert!(input.is_none());
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(!pretty);
                assert!(!no_script);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_flags() {
        let args = [
            "simplesearch",
            "build",
            "--input",
            "site",
            "--pretty",
            "--no-script",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                input,
                pretty,
                no_script,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("site")));
                assert!(pretty);
                assert!(no_script);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_keywords_command_parsing() {
        let args = ["simplesearch", "keywords", "Hello World", "--mode", "html"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Keywords { text, mode } => {
                assert_eq!(text.as_deref(), Some("Hello World"));
                assert_eq!(mode, Mode::Html);
            }
            _ => panic!("Expected Keywords command"),
        }
    }

    #[test]
    fn test_cli_keywords_defaults_to_stdin() {
        let args = ["simplesearch", "keywords"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Keywords { text, mode } => {
                assert!(text.is_none());
                assert_eq!(mode, Mode::Keywords);
            }
            _ => panic!("Expected Keywords command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["simplesearch", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["simplesearch", "--config", "site.toml", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }
}
