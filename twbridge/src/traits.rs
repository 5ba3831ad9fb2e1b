//! JSON documents a translation project is made of.
//!
//! Every project file is one pretty-printed JSON value followed by a newline.
//! Object keys keep their document order.

use std::{fs, io::Read, path::Path};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;

/// A project file with a JSON representation.
///
/// Implementors convert to and from a [`Value`]; reading and writing files is
/// shared.
///
/// # Example
///
/// ```rust,no_run
/// use twbridge::traits::Document;
/// use twbridge::types::StringCatalog;
///
/// let catalog = StringCatalog::read_from("library/.cache/i18n_strings.json")?;
/// catalog.write_to("strings_copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Document: Sized {
    fn from_json(value: Value) -> Result<Self, Error>;

    fn to_json(&self) -> Result<Value, Error>;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_json(serde_json::from_str(s)?)
    }

    fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Self::from_json(serde_json::from_reader(reader)?)
    }

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading");
        Self::from_str(&fs::read_to_string(path)?)
    }

    /// Pretty-printed JSON with a trailing newline.
    fn to_json_string(&self) -> Result<String, Error> {
        render_pretty(&self.to_json()?)
    }

    /// Writes the document to `path`, creating missing parent directories.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_pretty(path.as_ref(), &self.to_json()?)
    }
}

/// Writes any serializable value the way project files are written.
pub(crate) fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "writing");
    fs::write(path, render_pretty(value)?)?;
    Ok(())
}

fn render_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    let mut data = serde_json::to_string_pretty(value)?;
    data.push('\n');
    Ok(data)
}

/// Unwraps the top-level object of a document, naming `what` on failure.
pub(crate) fn expect_object(value: Value, what: &str) -> Result<Map<String, Value>, Error> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(Error::invalid_input(format!(
            "expected a JSON object for the {}, found {}",
            what,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expect_object_names_found_kind() {
        let err = expect_object(json!("text"), "message table").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: expected a JSON object for the message table, found a string"
        );
        assert!(expect_object(json!({}), "x").unwrap().is_empty());
    }

    #[test]
    fn test_write_pretty_ends_with_newline() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/frequency.json");
        write_pretty(&path, &["k1", "k2"]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  \"k1\",\n  \"k2\"\n]\n");
    }
}
