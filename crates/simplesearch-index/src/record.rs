//! Per-document search records.

use serde::{Serialize, Serializer, ser::SerializeMap};
use simplesearch_core::Document;
use tracing::trace;

use crate::directive::{FieldCleansers, UrlTransform};

/// Name of the field every record carries.
pub const URL_FIELD: &str = "url";

/// Cleansed fields of one document plus its URL.
///
/// Serializes as a flat JSON object: indexed fields in configuration order,
/// then `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    fields: Vec<(String, String)>,
    url: String,
}

impl SearchRecord {
    /// Build the record for one document.
    ///
    /// Fields without a cleanser or whose value is missing or empty are left
    /// out. The URL is computed last and always replaces an indexed field
    /// named `url`.
    pub fn build(
        document: &Document,
        key: &str,
        cleansers: &FieldCleansers,
        transform_url: &UrlTransform,
    ) -> Self {
        let mut fields = Vec::with_capacity(cleansers.len());

        for (name, cleanser) in cleansers.iter() {
            if name == URL_FIELD {
                continue;
            }

            let Some(value) = document.get(name).filter(|v| v.is_truthy()) else {
                trace!(key, field = name, "field missing or empty");
                continue;
            };

            fields.push((name.to_string(), cleanser.apply(&value.to_text())));
        }

        Self {
            fields,
            url: transform_url.apply(key),
        }
    }

    /// The record's URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Look up a field by name, including `url`.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == URL_FIELD {
            return Some(&self.url);
        }
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the indexed fields, without `url`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for SearchRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(URL_FIELD, &self.url)?;
        map.end()
    }
}
