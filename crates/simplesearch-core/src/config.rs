//! Search configuration management.

use std::{fmt, path::Path, path::PathBuf};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::error::{CoreError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "simplesearch.toml";

/// Main configuration structure for simplesearch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search index settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Input and output locations.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Key of the generated JSON index.
    #[serde(default = "default_destination_json")]
    pub destination_json: String,

    /// Key of the copied companion search script.
    #[serde(default = "default_destination_js")]
    pub destination_js: String,

    /// Do not emit the companion search script.
    #[serde(default)]
    pub skip_script: bool,

    /// Glob pattern selecting the documents to index.
    #[serde(default = "default_match", rename = "match")]
    pub match_pattern: String,

    /// Options for the glob pattern.
    #[serde(default)]
    pub match_options: MatchOptions,

    /// Prefix prepended to a document key to form its URL.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Pretty-print the JSON index.
    #[serde(default)]
    pub pretty: bool,

    /// Fields to index and how to cleanse them.
    #[serde(default)]
    pub index: IndexFields,
}

/// Glob matching options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Let wildcards match path segments starting with a dot.
    #[serde(default)]
    pub dot: bool,

    /// Match case-insensitively.
    #[serde(default)]
    pub nocase: bool,

    /// Match patterns without a slash against the final path segment.
    #[serde(default)]
    pub match_base: bool,
}

/// Input and output locations used by the command-line host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory whose files are collected.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory the generated artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Replacement for the bundled search script.
    #[serde(default)]
    pub script_asset: Option<PathBuf>,
}

/// How a single field is treated when building search records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDirective {
    /// `false` excludes the field, `true` keeps it as-is.
    Bool(bool),
    /// A named cleansing mode such as `"html"`.
    Mode(String),
}

impl From<bool> for FieldDirective {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldDirective {
    fn from(value: &str) -> Self {
        Self::Mode(value.to_string())
    }
}

/// Ordered list of indexed fields.
///
/// Serialized as a table; the order of the table's keys is kept. A key given
/// twice keeps its last directive at its first position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFields(pub Vec<(String, FieldDirective)>);

impl IndexFields {
    /// Iterate over `(field, directive)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDirective)> {
        self.0.iter().map(|(name, directive)| (name.as_str(), directive))
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Titles and keyword lists are normalized like body text so every default
/// field holds a keyword string.
impl Default for IndexFields {
    fn default() -> Self {
        Self(vec![
            ("title".to_string(), FieldDirective::from("keywords")),
            ("keywords".to_string(), FieldDirective::from("keywords")),
            ("contents".to_string(), FieldDirective::from("html")),
        ])
    }
}

impl Serialize for IndexFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, directive) in &self.0 {
            map.serialize_entry(name, directive)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IndexFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct IndexFieldsVisitor;

        impl<'de> Visitor<'de> for IndexFieldsVisitor {
            type Value = IndexFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of field names to booleans or mode names")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, directive)) =
                    access.next_entry::<String, FieldDirective>()?
                {
                    let position = fields
                        .iter()
                        .position(|(existing, _): &(String, FieldDirective)| *existing == name);
                    match position {
                        Some(idx) => fields[idx].1 = directive,
                        None => fields.push((name, directive)),
                    }
                }
                Ok(IndexFields(fields))
            }
        }

        deserializer.deserialize_map(IndexFieldsVisitor)
    }
}

// Default value functions
fn default_destination_json() -> String {
    "search.json".to_string()
}

fn default_destination_js() -> String {
    "simple-search.min.js".to_string()
}

fn default_match() -> String {
    "**/*.{htm,html}".to_string()
}

fn default_url_prefix() -> String {
    "/".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            destination_json: default_destination_json(),
            destination_js: default_destination_js(),
            skip_script: false,
            match_pattern: default_match(),
            match_options: MatchOptions::default(),
            url_prefix: default_url_prefix(),
            pretty: false,
            index: IndexFields::default(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            script_asset: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file layered with `SIMPLESEARCH__*`
    /// environment variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("SIMPLESEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` with environment overrides if it exists, otherwise
    /// fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_with_env(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;

        if search.destination_json.is_empty() {
            return Err(CoreError::config("search.destination_json cannot be empty"));
        }

        if !search.skip_script {
            if search.destination_js.is_empty() {
                return Err(CoreError::config("search.destination_js cannot be empty"));
            }
            if search.destination_js == search.destination_json {
                return Err(CoreError::config(
                    "search.destination_js and search.destination_json must differ",
                ));
            }
        }

        if search.match_pattern.is_empty() {
            return Err(CoreError::config("search.match cannot be empty"));
        }

        if search.index.is_empty() {
            tracing::warn!("search.index is empty, records will only contain a url");
        }

        Ok(())
    }
}
