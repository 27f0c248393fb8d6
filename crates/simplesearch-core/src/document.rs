//! Document model shared between the host pipeline and the indexer.
//!
//! A [`Document`] is what the site build hands over for every file: a raw
//! contents payload plus named metadata attributes. A [`DocumentSet`] keeps
//! documents keyed by path in the order they were collected.

use std::{borrow::Cow, collections::HashMap};

/// Name under which a document's raw contents are exposed as a field.
pub const CONTENTS_FIELD: &str = "contents";

/// File mode marker given to generated artifacts.
pub const DEFAULT_MODE: &str = "0644";

/// A single metadata value attached to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain text.
    Text(String),
    /// A list of strings, such as tags.
    List(Vec<String>),
    /// Raw bytes, expected to be UTF-8.
    Bytes(Vec<u8>),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
}

impl FieldValue {
    /// Whether the value carries anything worth indexing.
    ///
    /// Empty strings, lists and buffers, zero, NaN and `false` are all
    /// treated as absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Bytes(bytes) => !bytes.is_empty(),
            Self::Integer(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Bool(b) => *b,
        }
    }

    /// Convert the value into the text handed to a cleansing function.
    ///
    /// Lists are joined with a single space and byte buffers are decoded as
    /// UTF-8, replacing invalid sequences.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(" ")),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes),
            Self::Integer(n) => Cow::Owned(n.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
            Self::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    /// Convert a YAML frontmatter value.
    ///
    /// Returns `None` for null values and nested mappings.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        use serde_yaml::Value;

        match value {
            Value::Null | Value::Mapping(_) => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Sequence(items) => Some(Self::List(
                items
                    .iter()
                    .filter_map(Self::from_yaml)
                    .map(|item| item.to_text().into_owned())
                    .collect(),
            )),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }

    /// Convert a TOML frontmatter value.
    ///
    /// Returns `None` for nested tables.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        use toml::Value;

        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Integer(n) => Some(Self::Integer(*n)),
            Value::Float(f) => Some(Self::Float(*f)),
            Value::Boolean(b) => Some(Self::Bool(*b)),
            Value::Datetime(dt) => Some(Self::Text(dt.to_string())),
            Value::Array(items) => Some(Self::List(
                items
                    .iter()
                    .filter_map(Self::from_toml)
                    .map(|item| item.to_text().into_owned())
                    .collect(),
            )),
            Value::Table(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// A single file handed over by the site build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// File mode marker, e.g. `"0644"`.
    pub mode: Option<String>,

    /// Contents and metadata attributes by name.
    fields: HashMap<String, FieldValue>,
}

impl Document {
    /// Create a document with the given raw contents.
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        let mut fields = HashMap::new();
        fields.insert(
            CONTENTS_FIELD.to_string(),
            FieldValue::Bytes(contents.into()),
        );
        Self { mode: None, fields }
    }

    /// Set the file mode marker.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Attach a metadata attribute.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a metadata attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up an attribute by name. Raw contents are found under `contents`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Raw contents as bytes.
    ///
    /// Returns an empty slice if `contents` was overwritten with a non-byte
    /// value.
    pub fn contents(&self) -> &[u8] {
        match self.fields.get(CONTENTS_FIELD) {
            Some(FieldValue::Bytes(bytes)) => bytes,
            Some(FieldValue::Text(text)) => text.as_bytes(),
            _ => &[],
        }
    }
}

/// Documents keyed by path, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    entries: Vec<(String, Document)>,
    positions: HashMap<String, usize>,
}

impl DocumentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document.
    ///
    /// Replacing an existing key keeps its original position and returns the
    /// previous document.
    pub fn insert(&mut self, key: impl Into<String>, document: Document) -> Option<Document> {
        let key = key.into();
        if let Some(&idx) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[idx].1, document));
        }

        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, document));
        None
    }

    /// Look up a document by key.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.positions.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Whether a document exists under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Iterate over `(key, document)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Document)> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, document) in iter {
            set.insert(key, document);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Text(String::new()).is_truthy());
        assert!(!FieldValue::List(vec![]).is_truthy());
        assert!(!FieldValue::Bytes(vec![]).is_truthy());
        assert!(!FieldValue::Integer(0).is_truthy());
        assert!(!FieldValue::Float(f64::NAN).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());

        assert!(FieldValue::from("x").is_truthy());
        assert!(FieldValue::Integer(-3).is_truthy());
        assert!(FieldValue::Bool(true).is_truthy());
    }

    #[test]
    fn test_to_text() {
        let list = FieldValue::List(vec!["awesome".into(), "amazing".into()]);
        assert_eq!(list.to_text(), "awesome amazing");

        let bytes = FieldValue::Bytes(b"Main Index".to_vec());
        assert_eq!(bytes.to_text(), "Main Index");

        assert_eq!(FieldValue::Float(1.0).to_text(), "1");
        assert_eq!(FieldValue::Float(2.5).to_text(), "2.5");
        assert_eq!(FieldValue::Integer(42).to_text(), "42");
        assert_eq!(FieldValue::Bool(true).to_text(), "true");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes = FieldValue::Bytes(vec![b'o', b'k', 0xff]);
        assert_eq!(bytes.to_text(), "ok\u{fffd}");
    }

    #[test]
    fn test_from_yaml() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("[rust, 2024, true]").expect("parse yaml");
        assert_eq!(
            FieldValue::from_yaml(&value),
            Some(FieldValue::List(vec![
                "rust".into(),
                "2024".into(),
                "true".into()
            ]))
        );

        assert_eq!(FieldValue::from_yaml(&serde_yaml::Value::Null), None);
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Table = toml::from_str("n = 3\nf = 0.5\ntags = [\"a\", \"b\"]\n[nested]\nx = 1")
            .expect("parse toml");

        assert_eq!(
            FieldValue::from_toml(&table["n"]),
            Some(FieldValue::Integer(3))
        );
        assert_eq!(
            FieldValue::from_toml(&table["f"]),
            Some(FieldValue::Float(0.5))
        );
        assert_eq!(
            FieldValue::from_toml(&table["tags"]),
            Some(FieldValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(FieldValue::from_toml(&table["nested"]), None);
    }

    #[test]
    fn test_document_contents_field() {
        let doc = Document::new("Main Index").with_field("title", "Main index");

        assert_eq!(doc.contents(), b"Main Index");
        assert_eq!(
            doc.get(CONTENTS_FIELD),
            Some(&FieldValue::Bytes(b"Main Index".to_vec()))
        );
        assert_eq!(doc.get("title"), Some(&FieldValue::from("Main index")));
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn test_document_set_preserves_insertion_order() {
        let mut set = DocumentSet::new();
        set.insert("z.html", Document::new("z"));
        set.insert("a.html", Document::new("a"));
        set.insert("m.html", Document::new("m"));

        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["z.html", "a.html", "m.html"]);
    }

    #[test]
    fn test_document_set_replace_keeps_position() {
        let mut set = DocumentSet::new();
        set.insert("a", Document::new("first"));
        set.insert("b", Document::new("b"));

        let previous = set.insert("a", Document::new("second"));

        assert_eq!(previous.map(|d| d.contents().to_vec()), Some(b"first".to_vec()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys().next(), Some("a"));
        assert_eq!(set.get("a").map(Document::contents), Some(&b"second"[..]));
    }
}
