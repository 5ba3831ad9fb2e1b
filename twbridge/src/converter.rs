//! The two top-level conversions.
//!
//! [`export_to_positional`] publishes a printf-style source string in the
//! numbered-variable convention. [`import_from_template`] takes a translated
//! template back, expanding its `PLURAL`/`GENDER` markers into a tree of
//! printf-style variants.

use crate::marker::scan_markers;
use crate::placeholder::positional_to_printf;
use crate::variant::{VariantTree, build_marker_tree};

pub use crate::placeholder::export_to_positional;

/// Converts a translated template into printf-style variants.
///
/// Never fails: text that is not a well-formed marker is kept as-is. A
/// template without markers yields a single leaf.
///
/// ```rust
/// use twbridge::{VariantTree, import_from_template};
///
/// let tree = import_from_template("{{PLURAL:$1|one item|$1 items}} remaining");
/// assert_eq!(
///     tree,
///     VariantTree::Branches(vec![
///         VariantTree::Leaf("one item remaining".to_string()),
///         VariantTree::Leaf("%s items remaining".to_string()),
///     ])
/// );
/// ```
pub fn import_from_template(input: &str) -> VariantTree {
    let markers = scan_markers(input);
    build_marker_tree(input, &markers)
        .collapse()
        .map_leaves(&positional_to_printf)
}
