//! Documents exchanged with the string extractor and the translation platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::Error,
    traits::{Document, expect_object},
};

/// Where a source string is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Usage {
    pub file: String,
    pub line: usize,
}

/// What the extractor knows about one source string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringSpec {
    #[serde(default)]
    pub uses: Vec<Usage>,

    /// Argument types in order: `""`, `"person"`, `"number"`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl StringSpec {
    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }
}

/// The extractor's output: printf-style source strings in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringCatalog {
    pub strings: Vec<(String, StringSpec)>,
}

impl StringCatalog {
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringSpec)> {
        self.strings.iter().map(|(s, spec)| (s.as_str(), spec))
    }
}

impl Document for StringCatalog {
    fn from_json(value: Value) -> Result<Self, Error> {
        let strings = expect_object(value, "string catalog")?
            .into_iter()
            .map(|(string, spec)| -> Result<_, Error> {
                Ok((string, serde_json::from_value(spec)?))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(StringCatalog { strings })
    }

    fn to_json(&self) -> Result<Value, Error> {
        let mut object = Map::new();
        for (string, spec) in &self.strings {
            object.insert(string.clone(), serde_json::to_value(spec)?);
        }
        Ok(Value::Object(object))
    }
}

/// A flat key → string table, kept in document order.
///
/// Used both for translator output (key → template) and for the project's
/// `raw.json` tables (key → original source string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    pub entries: Vec<(String, String)>,
}

impl MessageTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Document for MessageTable {
    fn from_json(value: Value) -> Result<Self, Error> {
        let entries = expect_object(value, "message table")?
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                other => Err(Error::invalid_input(format!(
                    "expected a string for key `{}`, found {}",
                    key, other
                ))),
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(MessageTable { entries })
    }

    fn to_json(&self) -> Result<Value, Error> {
        Ok(Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        ))
    }
}
