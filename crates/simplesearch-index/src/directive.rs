//! Field directives and their resolution into cleansing functions.
//!
//! A [`Directive`] says how a field should be indexed. Before any document is
//! processed every directive is resolved into a [`Cleanser`], so record
//! building never has to inspect configuration again.

use std::{fmt, sync::Arc};

use simplesearch_core::FieldDirective;
use tracing::warn;

use crate::{
    keywords::make_keywords,
    normalize::{strip_html, strip_markdown},
};

/// A caller-supplied text transform.
pub type CleanseFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a single field is treated when building search records.
#[derive(Clone)]
pub enum Directive {
    /// Leave the field out of every record.
    Exclude,
    /// Store the stringified value unchanged.
    Keep,
    /// Strip HTML, then reduce to keywords.
    Html,
    /// Strip Markdown links, then reduce to keywords.
    Markdown,
    /// Reduce to keywords without removing markup.
    Keywords,
    /// Apply a custom function to the stringified value.
    Custom(CleanseFn),
}

impl Directive {
    /// Wrap a closure as a custom directive.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Parse a named mode.
    ///
    /// `"true"` and `"false"` act like their boolean forms, since layered
    /// configuration sources may hand booleans over as strings. Unknown
    /// names fall back to [`Directive::Keep`].
    pub fn from_mode(mode: &str) -> Self {
        match mode {
            "false" => Self::Exclude,
            "true" => Self::Keep,
            "html" => Self::Html,
            "markdown" | "md" => Self::Markdown,
            "keywords" => Self::Keywords,
            other => {
                warn!(mode = other, "unknown index mode, keeping value as-is");
                Self::Keep
            }
        }
    }

    /// Resolve into a cleansing function, or `None` if the field is excluded.
    pub fn resolve(&self) -> Option<Cleanser> {
        match self {
            Self::Exclude => None,
            Self::Keep => Some(Cleanser::Identity),
            Self::Html => Some(Cleanser::Html),
            Self::Markdown => Some(Cleanser::Markdown),
            Self::Keywords => Some(Cleanser::Keywords),
            Self::Custom(f) => Some(Cleanser::Custom(Arc::clone(f))),
        }
    }
}

impl From<&FieldDirective> for Directive {
    fn from(directive: &FieldDirective) -> Self {
        match directive {
            FieldDirective::Bool(false) => Self::Exclude,
            FieldDirective::Bool(true) => Self::Keep,
            FieldDirective::Mode(mode) => Self::from_mode(mode),
        }
    }
}

impl From<bool> for Directive {
    fn from(keep: bool) -> Self {
        if keep { Self::Keep } else { Self::Exclude }
    }
}

impl From<&str> for Directive {
    fn from(mode: &str) -> Self {
        Self::from_mode(mode)
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => f.write_str("Exclude"),
            Self::Keep => f.write_str("Keep"),
            Self::Html => f.write_str("Html"),
            Self::Markdown => f.write_str("Markdown"),
            Self::Keywords => f.write_str("Keywords"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A resolved cleansing function.
#[derive(Clone)]
pub enum Cleanser {
    /// Return the value unchanged.
    Identity,
    /// `make_keywords(strip_html(value))`.
    Html,
    /// `make_keywords(strip_markdown(value))`.
    Markdown,
    /// `make_keywords(value)`.
    Keywords,
    /// Caller-supplied function.
    Custom(CleanseFn),
}

impl Cleanser {
    /// Apply the function to a stringified field value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Identity => value.to_string(),
            Self::Html => make_keywords(&strip_html(value)),
            Self::Markdown => make_keywords(&strip_markdown(value)),
            Self::Keywords => make_keywords(value),
            Self::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Cleanser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Html => f.write_str("Html"),
            Self::Markdown => f.write_str("Markdown"),
            Self::Keywords => f.write_str("Keywords"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Cleansing functions for every indexed field, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct FieldCleansers {
    fields: Vec<(String, Cleanser)>,
}

impl FieldCleansers {
    /// Resolve directives once. Excluded fields are dropped; a field named
    /// twice keeps its last directive at its first position.
    pub fn resolve<'a, I>(directives: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Directive)>,
    {
        let mut fields: Vec<(String, Option<Cleanser>)> = Vec::new();
        for (name, directive) in directives {
            let resolved = directive.resolve();
            match fields.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = resolved,
                None => fields.push((name.to_string(), resolved)),
            }
        }

        Self {
            fields: fields
                .into_iter()
                .filter_map(|(name, cleanser)| cleanser.map(|c| (name, c)))
                .collect(),
        }
    }

    /// Iterate over `(field, cleanser)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cleanser)> {
        self.fields.iter().map(|(name, cleanser)| (name.as_str(), cleanser))
    }

    /// Look up the cleanser for a field.
    pub fn get(&self, name: &str) -> Option<&Cleanser> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, cleanser)| cleanser)
    }

    /// Number of indexed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is indexed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Turns a document key into the URL stored in its record.
#[derive(Clone)]
pub enum UrlTransform {
    /// Prepend a fixed prefix to the key.
    Prefix(String),
    /// Caller-supplied function.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl UrlTransform {
    /// Wrap a closure as a custom transform.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Compute the URL for a document key.
    pub fn apply(&self, key: &str) -> String {
        match self {
            Self::Prefix(prefix) => format!("{prefix}{key}"),
            Self::Custom(f) => f(key),
        }
    }
}

impl Default for UrlTransform {
    fn default() -> Self {
        Self::Prefix("/".to_string())
    }
}

impl fmt::Debug for UrlTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
