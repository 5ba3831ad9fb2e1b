//! Expansion of a template string into every concrete variant.
//!
//! Each level of a [`VariantTree`] corresponds to one variable position, from
//! `$1` up to the highest position any marker references. A level's children
//! are the branch choices made for that position; leaves hold the fully
//! substituted strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::marker::TemplateMarker;
use crate::patch::{Patch, apply_patches};

/// A tree of string variants, one level per variable position.
///
/// Serializes as a bare string for a leaf and a nested array for branches,
/// which is the shape translation tables use for plural and gender forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantTree {
    Leaf(String),
    Branches(Vec<VariantTree>),
}

impl VariantTree {
    pub fn is_leaf(&self) -> bool {
        matches!(self, VariantTree::Leaf(_))
    }

    /// All leaf strings, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            VariantTree::Leaf(s) => out.push(s),
            VariantTree::Branches(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            VariantTree::Leaf(_) => 1,
            VariantTree::Branches(children) => children.iter().map(VariantTree::leaf_count).sum(),
        }
    }

    /// Rewrites every leaf with `f`, keeping the branch structure.
    pub fn map_leaves<F>(self, f: &F) -> VariantTree
    where
        F: Fn(&str) -> String,
    {
        match self {
            VariantTree::Leaf(s) => VariantTree::Leaf(f(&s)),
            VariantTree::Branches(children) => VariantTree::Branches(
                children.into_iter().map(|c| c.map_leaves(f)).collect(),
            ),
        }
    }

    /// Removes levels that do not branch.
    ///
    /// Children are collapsed first; a `Branches` node left with a single
    /// child is then replaced by that child. Leaves are never merged, even
    /// when siblings hold equal text.
    pub fn collapse(self) -> VariantTree {
        match self {
            VariantTree::Leaf(_) => self,
            VariantTree::Branches(children) => {
                let mut children: Vec<VariantTree> =
                    children.into_iter().map(VariantTree::collapse).collect();
                if children.len() == 1 {
                    children.remove(0)
                } else {
                    VariantTree::Branches(children)
                }
            }
        }
    }
}

/// Highest variable position for which [`build_variant_tree`] still emits a
/// single-child level for every position without markers.
pub const MAX_NESTED_POSITIONS: usize = 256;

/// Builds the uncollapsed variant tree for `input` and its scanned `markers`.
///
/// Every position from `$1` to the highest referenced one gets a level;
/// positions without markers get a level with a single child. Past
/// [`MAX_NESTED_POSITIONS`] only positions with markers get a level, which
/// keeps the tree depth bounded by the number of markers. Leaves and their
/// order are the same either way.
///
/// Markers that share a variable position advance together by branch index
/// rather than being combined pairwise. A marker with fewer branches than its
/// siblings is left out of the variants past its last branch.
pub fn build_variant_tree(input: &str, markers: &[TemplateMarker]) -> VariantTree {
    let by_position = group_by_position(markers);
    let levels: Vec<usize> = match by_position.keys().next_back() {
        None => return VariantTree::Leaf(input.to_string()),
        Some(&max) if max <= MAX_NESTED_POSITIONS => (1..=max).collect(),
        Some(_) => by_position.keys().copied().collect(),
    };
    TreeBuilder {
        input,
        by_position,
        levels,
    }
    .build()
}

/// Builds a variant tree with one level per position that has markers.
///
/// Collapses to the same tree as [`build_variant_tree`], whatever the
/// variable indices are.
pub fn build_marker_tree(input: &str, markers: &[TemplateMarker]) -> VariantTree {
    let by_position = group_by_position(markers);
    let levels = by_position.keys().copied().collect();
    TreeBuilder {
        input,
        by_position,
        levels,
    }
    .build()
}

fn group_by_position(markers: &[TemplateMarker]) -> BTreeMap<usize, Vec<&TemplateMarker>> {
    let mut by_position: BTreeMap<usize, Vec<&TemplateMarker>> = BTreeMap::new();
    for marker in markers {
        by_position
            .entry(marker.variable_index)
            .or_default()
            .push(marker);
    }
    by_position
}

struct TreeBuilder<'a> {
    input: &'a str,
    by_position: BTreeMap<usize, Vec<&'a TemplateMarker>>,
    /// Variable positions, outermost first.
    levels: Vec<usize>,
}

impl TreeBuilder<'_> {
    fn build(&self) -> VariantTree {
        if self.levels.is_empty() {
            return VariantTree::Leaf(self.input.to_string());
        }
        VariantTree::Branches(self.level(0, Vec::new()))
    }

    fn level(&self, depth: usize, stack: Vec<Patch>) -> Vec<VariantTree> {
        let extensions = self.extend(self.levels[depth], stack);

        if depth + 1 == self.levels.len() {
            return extensions
                .iter()
                .map(|patches| VariantTree::Leaf(apply_patches(self.input, patches)))
                .collect();
        }

        extensions
            .into_iter()
            .map(|patches| VariantTree::Branches(self.level(depth + 1, patches)))
            .collect()
    }

    fn extend(&self, position: usize, stack: Vec<Patch>) -> Vec<Vec<Patch>> {
        let here = match self.by_position.get(&position) {
            Some(markers) => markers,
            None => return vec![stack],
        };

        let width = here.iter().map(|m| m.branches.len()).max().unwrap_or(0);
        (0..width)
            .map(|index| {
                let mut patches = stack.clone();
                patches.extend(here.iter().filter_map(|m| {
                    m.branch(index)
                        .map(|part| Patch::new(m.offset, m.length, part))
                }));
                patches
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::scan_markers;

    fn leaf(s: &str) -> VariantTree {
        VariantTree::Leaf(s.to_string())
    }

    fn build(input: &str) -> VariantTree {
        build_variant_tree(input, &scan_markers(input))
    }

    #[test]
    fn test_no_markers_is_single_leaf() {
        assert_eq!(build("plain $1 text"), leaf("plain $1 text"));
    }

    #[test]
    fn test_single_marker() {
        let tree = build("{{PLURAL:$1|one item|$1 items}} remaining");
        assert_eq!(
            tree,
            VariantTree::Branches(vec![leaf("one item remaining"), leaf("$1 items remaining")])
        );
    }

    #[test]
    fn test_empty_positions_are_visited() {
        let tree = build("x {{PLURAL:$2|a|b}}");
        assert_eq!(
            tree,
            VariantTree::Branches(vec![VariantTree::Branches(vec![leaf("x a"), leaf("x b")])])
        );
    }

    #[test]
    fn test_two_positions_row_major() {
        let tree = build("{{GENDER:$2|He|She|They}} sent {{PLURAL:$1|a message|$1 messages}}");
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(
            tree.leaves(),
            vec![
                "He sent a message",
                "She sent a message",
                "They sent a message",
                "He sent $1 messages",
                "She sent $1 messages",
                "They sent $1 messages",
            ]
        );
    }

    #[test]
    fn test_shared_position_advances_in_lockstep() {
        let tree = build("{{PLURAL:$1|is|are}} $1 {{PLURAL:$1|item|items}}");
        assert_eq!(
            tree,
            VariantTree::Branches(vec![leaf("is $1 item"), leaf("are $1 items")])
        );
    }

    #[test]
    fn test_shorter_marker_is_left_unpatched() {
        let tree = build("[{{PLURAL:$1|a|b|c}}] [{{PLURAL:$1|x}}]");
        assert_eq!(
            tree.leaves(),
            vec!["[a] [x]", "[b] [{{PLURAL:$1|x}}]", "[c] [{{PLURAL:$1|x}}]"]
        );
    }

    #[test]
    fn test_collapse_removes_single_child_levels() {
        let tree = build("x {{PLURAL:$2|a|b}}").collapse();
        assert_eq!(tree, VariantTree::Branches(vec![leaf("x a"), leaf("x b")]));
    }

    #[test]
    fn test_collapse_single_branch_marker_to_leaf() {
        let tree = build("{{GENDER:$1|they}} left").collapse();
        assert_eq!(tree, leaf("they left"));
    }

    #[test]
    fn test_collapse_keeps_equal_siblings() {
        let tree = build("{{PLURAL:$1|same|same}}").collapse();
        assert_eq!(tree, VariantTree::Branches(vec![leaf("same"), leaf("same")]));
    }

    #[test]
    fn test_deep_positions_without_markers_are_skipped() {
        let tree = build("{{PLURAL:$100000|one|many}} left");
        assert_eq!(
            tree,
            VariantTree::Branches(vec![leaf("one left"), leaf("many left")])
        );
    }

    #[test]
    fn test_nested_levels_up_to_limit() {
        let input = format!("{{{{PLURAL:${}|a|b}}}}", MAX_NESTED_POSITIONS);
        let tree = build(&input);
        let mut depth = 0;
        let mut node = &tree;
        while let VariantTree::Branches(children) = node {
            depth += 1;
            node = &children[0];
        }
        assert_eq!(depth, MAX_NESTED_POSITIONS);
        assert_eq!(tree.collapse().leaves(), vec!["a", "b"]);
    }

    #[test]
    fn test_marker_tree_matches_collapsed_full_tree() {
        let input = "$1 {{GENDER:$3|he|she}} {{PLURAL:$5|x|y|z}}";
        let markers = scan_markers(input);
        let sparse = build_marker_tree(input, &markers);
        assert_eq!(sparse.leaf_count(), 6);
        assert_eq!(sparse.clone().collapse(), build_variant_tree(input, &markers).collapse());
        assert_eq!(build_marker_tree("plain", &[]), leaf("plain"));
    }

    #[test]
    fn test_map_leaves_keeps_structure() {
        let tree = VariantTree::Branches(vec![
            leaf("a"),
            VariantTree::Branches(vec![leaf("b"), leaf("c")]),
        ]);
        let mapped = tree.map_leaves(&|s: &str| s.to_uppercase());
        assert_eq!(
            mapped,
            VariantTree::Branches(vec![
                leaf("A"),
                VariantTree::Branches(vec![leaf("B"), leaf("C")]),
            ])
        );
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let tree = VariantTree::Branches(vec![
            leaf("a"),
            VariantTree::Branches(vec![leaf("b"), leaf("c")]),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"["a",["b","c"]]"#);
        let back: VariantTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
