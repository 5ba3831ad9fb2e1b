//! Scanning of `{{PLURAL:$N|...}}` and `{{GENDER:$N|...}}` branch markers.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKER_REGEX: Regex =
        Regex::new(r"\{\{(PLURAL|GENDER):\$([0-9]+)\|([^}]*)\}\}").unwrap();
}

/// The agreement a marker selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Plural,
    Gender,
}

impl Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerKind::Plural => write!(f, "PLURAL"),
            MarkerKind::Gender => write!(f, "GENDER"),
        }
    }
}

/// A branch marker found in a template string.
///
/// `offset` and `length` are byte positions of the whole `{{...}}` construct
/// in the scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMarker {
    pub kind: MarkerKind,
    pub variable_index: usize,
    pub branches: Vec<String>,
    pub offset: usize,
    pub length: usize,
}

impl TemplateMarker {
    /// The branch text for `index`, if this marker has that many branches.
    pub fn branch(&self, index: usize) -> Option<&str> {
        self.branches.get(index).map(String::as_str)
    }
}

/// Returns every marker in `input`, left to right.
///
/// Text that does not match the marker grammar is not an error; it is simply
/// not reported. Markers referring to `$0`, or to an index too large to
/// represent, are treated the same way.
pub fn scan_markers(input: &str) -> Vec<TemplateMarker> {
    MARKER_REGEX
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = match &caps[1] {
                "PLURAL" => MarkerKind::Plural,
                _ => MarkerKind::Gender,
            };
            let variable_index = caps[2].parse::<usize>().ok().filter(|i| *i >= 1)?;
            let branches = caps[3].split('|').map(str::to_string).collect();
            Some(TemplateMarker {
                kind,
                variable_index,
                branches,
                offset: whole.start(),
                length: whole.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_plural_marker() {
        let markers = scan_markers("{{PLURAL:$1|one item|$1 items}} remaining");
        assert_eq!(markers.len(), 1);
        let m = &markers[0];
        assert_eq!(m.kind, MarkerKind::Plural);
        assert_eq!(m.variable_index, 1);
        assert_eq!(m.branches, vec!["one item", "$1 items"]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.length, "{{PLURAL:$1|one item|$1 items}}".len());
    }

    #[test]
    fn test_markers_in_source_order() {
        let input = "{{GENDER:$2|He|She}} sent {{PLURAL:$1|a message|$1 messages}}";
        let markers = scan_markers(input);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, MarkerKind::Gender);
        assert_eq!(markers[0].variable_index, 2);
        assert_eq!(markers[1].kind, MarkerKind::Plural);
        assert_eq!(markers[1].variable_index, 1);
        assert_eq!(markers[1].offset, input.find("{{PLURAL").unwrap());
        assert!(markers[0].offset < markers[1].offset);
    }

    #[test]
    fn test_single_branch_marker() {
        let markers = scan_markers("{{GENDER:$1|they}}");
        assert_eq!(markers[0].branches, vec!["they"]);
    }

    #[test]
    fn test_empty_branch_text() {
        let markers = scan_markers("{{PLURAL:$3||s}}");
        assert_eq!(markers[0].variable_index, 3);
        assert_eq!(markers[0].branches, vec!["", "s"]);
        assert_eq!(markers[0].branch(1), Some("s"));
        assert_eq!(markers[0].branch(2), None);
    }

    #[test]
    fn test_multibyte_offsets() {
        let input = "Ñandú {{PLURAL:$1|pájaro|pájaros}}";
        let markers = scan_markers(input);
        assert_eq!(markers[0].offset, "Ñandú ".len());
        assert_eq!(&input[markers[0].offset..], "{{PLURAL:$1|pájaro|pájaros}}");
    }

    #[test]
    fn test_malformed_markers_are_ignored() {
        assert!(scan_markers("{{PLURAL:$1|unterminated").is_empty());
        assert!(scan_markers("{{PLURAL:1|no dollar}}").is_empty());
        assert!(scan_markers("{{PLURAL:$1}}").is_empty());
        assert!(scan_markers("{{plural:$1|a|b}}").is_empty());
        assert!(scan_markers("{{GRAMMAR:$1|a|b}}").is_empty());
        assert!(scan_markers("{{PLURAL:$0|a|b}}").is_empty());
        assert!(scan_markers("{{PLURAL:$١|a|b}}").is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MarkerKind::Plural.to_string(), "PLURAL");
        assert_eq!(MarkerKind::Gender.to_string(), "GENDER");
    }
}
