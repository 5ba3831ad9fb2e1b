#![forbid(unsafe_code)]
//! Bidirectional placeholder conversion between printf-style source strings
//! and translatewiki-style templates.
//!
//! Source code formats strings with `%s`, `%d` and `%%`. The translation
//! platform works with numbered variables (`$1`, `$2`, ...) and expresses
//! agreement inline with `{{PLURAL:$N|...}}` and `{{GENDER:$N|...}}`.
//!
//! # Quick Start
//!
//! ```rust
//! use twbridge::{VariantTree, export_to_positional, import_from_template};
//!
//! // Publish a source string
//! assert_eq!(export_to_positional("Deleted %d of %d files")?, "Deleted $1 of $2 files");
//!
//! // Bring a translation back, one printf string per plural form
//! let tree = import_from_template("{{PLURAL:$1|one file|$1 files}} deleted");
//! assert_eq!(tree.leaves(), vec!["one file deleted", "%s files deleted"]);
//! assert!(matches!(tree, VariantTree::Branches(_)));
//! # Ok::<(), twbridge::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`placeholder`]: printf ↔ numbered-variable rewriting
//! - [`marker`]: `PLURAL`/`GENDER` marker scanning
//! - [`variant`]: variant tree expansion and collapsing
//! - [`patch`]: offset-safe text substitution
//! - [`project`]: export tables and translation import
//! - [`php`]: PHP translation class rendering

pub mod converter;
pub mod error;
pub mod marker;
pub mod patch;
pub mod php;
pub mod placeholder;
pub mod project;
pub mod traits;
pub mod types;
pub mod variant;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{export_to_positional, import_from_template},
    error::Error,
    marker::{MarkerKind, TemplateMarker, scan_markers},
    patch::{Patch, apply_patches},
    placeholder::{PrintfToken, positional_to_printf, tokenize_printf},
    project::{ExportProject, import_translations, load_raw_strings, string_key},
    traits::Document,
    types::{MessageTable, StringCatalog, StringSpec, Usage},
    variant::{VariantTree, build_marker_tree, build_variant_tree},
};
