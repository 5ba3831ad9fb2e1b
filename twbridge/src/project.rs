//! Translation projects: what gets published for translators and how their
//! work comes back.
//!
//! Exporting turns a [`StringCatalog`] into per-group `en.json` (numbered
//! templates), `qqq.json` (translator context) and `raw.json` (original source
//! strings), keyed by a short content hash. Importing joins a translated table
//! back to the raw strings and expands each translation into printf variants.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::{
    converter::{export_to_positional, import_from_template},
    error::Error,
    traits::{Document, write_pretty},
    types::{MessageTable, StringCatalog, StringSpec},
    variant::VariantTree,
};

lazy_static! {
    static ref APPLICATION_REGEX: Regex =
        Regex::new(r"/applications/(?P<application>[^/]+)/").unwrap();
}

/// Group used for strings that belong to no single application.
pub const CORE_GROUP: &str = "core";

/// Stable identity for a source string: the first 16 hex digits of its SHA-1.
pub fn string_key(string: &str) -> String {
    let mut key = format!("{:x}", Sha1::digest(string.as_bytes()));
    key.truncate(16);
    key
}

/// The application a string belongs to, judged by where it is used.
pub fn group_for(spec: &StringSpec) -> String {
    let applications: BTreeSet<&str> = spec
        .uses
        .iter()
        .filter_map(|usage| APPLICATION_REGEX.captures(&usage.file))
        .filter_map(|caps| caps.name("application"))
        .map(|m| m.as_str())
        .collect();

    match applications.len() {
        1 => applications.into_iter().next().unwrap_or(CORE_GROUP).to_string(),
        _ => CORE_GROUP.to_string(),
    }
}

/// Documentation shown to translators next to the string.
///
/// Lists the argument types using the platform's own vocabulary, then every
/// place the string is used. With a `browse_uri`, usages become links.
pub fn context_for(spec: &StringSpec, browse_uri: Option<&str>) -> String {
    let mut help = String::new();

    let types = spec.types();
    if !types.is_empty() {
        let labels: Vec<&str> = types
            .iter()
            .map(|t| match t.as_str() {
                "" => "NONE",
                "person" => "GENDER",
                "number" => "PLURAL",
                other => other,
            })
            .collect();
        help.push_str(&format!("Variable Types: {}.", labels.join(", ")));
        help.push('\n');
    }

    if !spec.uses.is_empty() {
        let usage: Vec<String> = spec
            .uses
            .iter()
            .map(|usage| {
                let name = Path::new(&usage.file)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| usage.file.clone());
                match browse_uri.filter(|uri| !uri.is_empty()) {
                    Some(uri) => format!(
                        "[{}{}${} {}:{}]",
                        uri, usage.file, usage.line, name, usage.line
                    ),
                    None => format!("{}:{}", name, usage.line),
                }
            })
            .collect();
        help.push_str("Used in:");
        help.push_str("\n\n");
        help.push_str(&usage.join("\n"));
        help.push('\n');
    }

    help
}

/// The three tables published for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTables {
    /// key → numbered-variable template
    pub en: BTreeMap<String, String>,
    /// key → translator context
    pub qqq: BTreeMap<String, String>,
    /// key → original printf-style string
    pub raw: BTreeMap<String, String>,
}

/// A source string the exporter could not convert.
#[derive(Debug)]
pub struct Rejection {
    pub string: String,
    pub error: Error,
}

/// Everything an export run produces, before it is written to disk.
#[derive(Debug, Default)]
pub struct ExportProject {
    pub groups: BTreeMap<String, GroupTables>,
    pub frequency: BTreeSet<String>,
    pub rejected: Vec<Rejection>,
}

impl ExportProject {
    /// Converts every catalog string. Strings that cannot be expressed in the
    /// numbered-variable convention are logged and kept in `rejected`.
    pub fn build(catalog: &StringCatalog, browse_uri: Option<&str>) -> Self {
        let mut project = ExportProject::default();

        for (string, spec) in catalog.iter() {
            let exported = match export_to_positional(string) {
                Ok(exported) => exported,
                Err(error) => {
                    warn!(%error, "skipping string");
                    project.rejected.push(Rejection {
                        string: string.to_string(),
                        error,
                    });
                    continue;
                }
            };

            let key = string_key(string);
            let tables = project.groups.entry(group_for(spec)).or_default();
            tables.raw.insert(key.clone(), string.to_string());
            tables.en.insert(key.clone(), exported);
            tables.qqq.insert(key.clone(), context_for(spec, browse_uri));
            project.frequency.insert(key);
        }

        project
    }

    pub fn exported_count(&self) -> usize {
        self.frequency.len()
    }

    /// Writes the project under `root`, returning the files written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>, Error> {
        let root = root.as_ref();
        let mut written = Vec::new();

        for (group, tables) in &self.groups {
            let dir = root.join(group);
            let files = [
                ("en.json", &tables.en),
                ("qqq.json", &tables.qqq),
                ("raw.json", &tables.raw),
            ];
            for (name, table) in files {
                let path = dir.join(name);
                write_pretty(&path, table)?;
                written.push(path);
            }
        }

        let path = root.join("frequency.json");
        write_pretty(&path, &self.frequency)?;
        written.push(path);

        Ok(written)
    }
}

/// Reads every `raw.json` of an exported project into one table.
///
/// Looks at the project root and at each group directory below it.
pub fn load_raw_strings<P: AsRef<Path>>(project_dir: P) -> Result<BTreeMap<String, String>, Error> {
    let project_dir = project_dir.as_ref();
    if !project_dir.is_dir() {
        return Err(Error::invalid_input(format!(
            "project directory does not exist: {}",
            project_dir.display()
        )));
    }

    let mut candidates = vec![project_dir.join("raw.json")];
    let mut group_dirs: Vec<PathBuf> = fs::read_dir(project_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    group_dirs.sort();
    candidates.extend(group_dirs.into_iter().map(|dir| dir.join("raw.json")));

    let mut raw = BTreeMap::new();
    for path in candidates.into_iter().filter(|p| p.is_file()) {
        debug!(path = %path.display(), "reading raw strings");
        let table = MessageTable::read_from(&path)?;
        raw.extend(table.entries);
    }
    Ok(raw)
}

/// Joins translated templates to their source strings and expands each one.
///
/// Keys with no source string are logged and skipped. The result keeps the
/// order of `translations`.
pub fn import_translations(
    translations: &MessageTable,
    raw: &BTreeMap<String, String>,
) -> Vec<(String, VariantTree)> {
    translations
        .entries
        .iter()
        .filter_map(|(key, template)| match raw.get(key) {
            Some(source) => Some((source.clone(), import_from_template(template))),
            None => {
                warn!(
                    key = %key,
                    "Ignoring string \"{}\"; not present in translation source file.",
                    template
                );
                None
            }
        })
        .collect()
}
