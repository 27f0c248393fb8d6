//! Frontmatter parsing for collected files.
//!
//! Attributes found in a YAML (`---`) or TOML (`+++`) block at the top of a
//! file become document metadata; the remainder becomes its contents.

use std::{collections::HashMap, path::Path};

use crate::{
    document::{CONTENTS_FIELD, Document, FieldValue},
    error::{CoreError, Result},
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter attributes from a string.
///
/// Returns the attributes and the body. Content without frontmatter yields
/// no attributes and the full content as body. Nested tables and null values
/// are dropped.
pub fn parse_frontmatter(
    content: &str,
    path: &Path,
) -> Result<(HashMap<String, FieldValue>, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((HashMap::new(), content.to_string()));
    };

    let attributes = match format {
        FrontmatterFormat::Yaml => {
            let mapping: serde_yaml::Mapping = if fm_str.is_empty() {
                serde_yaml::Mapping::new()
            } else {
                serde_yaml::from_str(fm_str)
                    .map_err(|e| CoreError::frontmatter(path, e.to_string()))?
            };
            mapping
                .iter()
                .filter_map(|(key, value)| {
                    let key = key.as_str()?.to_string();
                    FieldValue::from_yaml(value).map(|v| (key, v))
                })
                .collect()
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table = toml::from_str(fm_str)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            table
                .iter()
                .filter_map(|(key, value)| {
                    FieldValue::from_toml(value).map(|v| (key.clone(), v))
                })
                .collect()
        }
    };

    Ok((attributes, body.to_string()))
}

/// Build a document from file text, lifting frontmatter into metadata.
///
/// A frontmatter attribute named `contents` is ignored so the body always
/// stays reachable as the document's contents.
pub fn document_from_source(content: &str, path: &Path) -> Result<Document> {
    let (attributes, body) = parse_frontmatter(content, path)?;

    let mut document = Document::new(body);
    for (name, value) in attributes {
        if name == CONTENTS_FIELD {
            tracing::debug!(path = %path.display(), "ignoring frontmatter contents attribute");
            continue;
        }
        document.set(name, value);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = r#"+++
title = "Hello World"
+++

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "<p>Just some content without frontmatter.</p>";
        assert!(split_frontmatter(content).is_none());

        let (attributes, body) =
            parse_frontmatter(content, Path::new("page.html")).expect("parse");
        assert!(attributes.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_yaml_attributes() {
        let content = r#"---
title: "Test Post"
draft: false
weight: 3
keywords:
  - rust
  - search
author: ~
---

Content here."#;

        let (attributes, body) =
            parse_frontmatter(content, Path::new("test.md")).expect("parse");

        assert_eq!(attributes["title"], FieldValue::from("Test Post"));
        assert_eq!(attributes["draft"], FieldValue::Bool(false));
        assert_eq!(attributes["weight"], FieldValue::Integer(3));
        assert_eq!(
            attributes["keywords"],
            FieldValue::List(vec!["rust".into(), "search".into()])
        );
        assert!(!attributes.contains_key("author"));
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_attributes() {
        let content = r#"+++
title = "Test Post"
keywords = ["rust", "search"]
+++

Content here."#;

        let (attributes, body) =
            parse_frontmatter(content, Path::new("test.md")).expect("parse");

        assert_eq!(attributes["title"], FieldValue::from("Test Post"));
        assert_eq!(
            attributes["keywords"],
            FieldValue::List(vec!["rust".into(), "search".into()])
        );
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let result = parse_frontmatter(content, Path::new("bad.md"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bad.md"));
    }

    #[test]
    fn test_document_from_source() {
        let content = "---\ntitle: Main index\ncontents: ignored\n---\nMain Index";
        let doc = document_from_source(content, Path::new("index.html")).expect("parse");

        assert_eq!(doc.contents(), b"Main Index");
        assert_eq!(doc.get("title"), Some(&FieldValue::from("Main index")));
    }
}
