//! Rendering of imported translations as a PHP translation class.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, variant::VariantTree};

lazy_static! {
    static ref PHP_IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

const INDENT: &str = "  ";

/// Quotes `value` as a single-quoted PHP string literal.
pub fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Renders `source string => translation` pairs as a PHP array literal.
///
/// Variants become nested lists without explicit integer keys.
pub fn render_translations(translations: &[(String, VariantTree)]) -> String {
    let mut out = String::from("array(\n");
    for (source, tree) in translations {
        out.push_str(INDENT);
        out.push_str(&php_string(source));
        out.push_str(" => ");
        render_tree(tree, 1, &mut out);
        out.push_str(",\n");
    }
    out.push(')');
    out
}

fn render_tree(tree: &VariantTree, depth: usize, out: &mut String) {
    match tree {
        VariantTree::Leaf(s) => out.push_str(&php_string(s)),
        VariantTree::Branches(children) => {
            out.push_str("array(\n");
            for child in children {
                out.push_str(&INDENT.repeat(depth + 1));
                render_tree(child, depth + 1, out);
                out.push_str(",\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(')');
        }
    }
}

/// Renders a complete `PhutilTranslation` subclass for `locale`.
pub fn render_translation_class(
    class: &str,
    locale: &str,
    translations: &[(String, VariantTree)],
) -> Result<String, Error> {
    if !PHP_IDENTIFIER_REGEX.is_match(class) {
        return Err(Error::invalid_input(format!(
            "`{}` is not a valid PHP class name",
            class
        )));
    }

    let strings = render_translations(translations).replace('\n', "\n    ");
    Ok(format!(
        "<?php

final class {class}
  extends PhutilTranslation {{

  public function getLocaleCode() {{
    return {locale};
  }}

  protected function getTranslations() {{
    return {strings};
  }}

}}
",
        class = class,
        locale = php_string(locale),
        strings = strings,
    ))
}
