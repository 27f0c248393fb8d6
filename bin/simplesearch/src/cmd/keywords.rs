//! Keywords command - shows how a piece of text is cleansed for the index

use std::io::Read;

use color_eyre::eyre::{Result, WrapErr};
use simplesearch_index::Directive;

/// Cleansing applied by the keywords command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Tokenize only.
    #[default]
    Keywords,
    /// Strip HTML, then tokenize.
    Html,
    /// Strip Markdown links, then tokenize.
    Markdown,
}

impl From<Mode> for Directive {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Keywords => Self::Keywords,
            Mode::Html => Self::Html,
            Mode::Markdown => Self::Markdown,
        }
    }
}

/// Cleanse `text` the way an indexed field with `mode` would be.
pub fn cleanse(text: &str, mode: Mode) -> String {
    Directive::from(mode)
        .resolve()
        .map(|cleanser| cleanser.apply(text))
        .unwrap_or_default()
}

/// Run the keywords command.
///
/// Reads standard input when no text is given.
pub fn run(text: Option<&str>, mode: Mode) -> Result<()> {
    let input = match text {
        Some(text) => text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read standard input")?;
            buffer
        }
    };

    tracing::debug!(?mode, bytes = input.len(), "cleansing text");
    println!("{}", cleanse(&input, mode));

    Ok(())
}
