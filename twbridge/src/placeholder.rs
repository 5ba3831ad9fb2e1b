//! Placeholder rewriting between printf-style and numbered-variable strings.
//!
//! - Export: `%s` / `%d` become `$1`, `$2`, ... in occurrence order and `%%`
//!   becomes `%`.
//! - Import: `%` is escaped to `%%` and each `$N` becomes `%s`, or the
//!   explicit positional form `%N$s` when arguments are out of order.
//!
//! Both directions collect [`Patch`]es against the scanned string and apply
//! them in one pass, so replacements of different lengths never disturb the
//! offsets of later tokens.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::patch::{Patch, apply_patches};

lazy_static! {
    static ref POSITIONAL_REGEX: Regex = Regex::new(r"\$([0-9]+)").unwrap();
}

/// One lexical unit of a printf-style string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintfToken {
    Literal(String),
    /// `%%`
    EscapedPercent,
    /// `%s` or `%d`, numbered by occurrence starting at 1.
    PositionalArg(usize),
}

#[derive(Debug)]
struct ScannedToken {
    offset: usize,
    length: usize,
    token: PrintfToken,
}

/// Splits a printf-style string into tokens.
///
/// Fails on any `%` directive other than `%%`, `%s` and `%d`, and on any
/// literal `$`, which would be indistinguishable from a numbered variable once
/// exported. Directive errors take precedence over `$` errors.
pub fn tokenize_printf(input: &str) -> Result<Vec<PrintfToken>, Error> {
    Ok(scan_printf(input)?.into_iter().map(|t| t.token).collect())
}

fn scan_printf(input: &str) -> Result<Vec<ScannedToken>, Error> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut ordinal = 1;
    let mut literal_start = 0;
    let mut has_dollar = false;
    let mut i = 0;

    let flush_literal = |out: &mut Vec<ScannedToken>, start: usize, end: usize| {
        if end > start {
            out.push(ScannedToken {
                offset: start,
                length: end - start,
                token: PrintfToken::Literal(input[start..end].to_string()),
            });
        }
    };

    while i < bytes.len() {
        if bytes[i] == b'$' {
            has_dollar = true;
            i += 1;
            continue;
        }
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        // A trailing '%' or one before a line break is not a directive.
        let next = match input[i + 1..].chars().next() {
            Some(c) if c != '\n' => c,
            _ => {
                i += 1;
                continue;
            }
        };

        let length = 1 + next.len_utf8();
        let token = match next {
            '%' => PrintfToken::EscapedPercent,
            's' | 'd' => {
                let token = PrintfToken::PositionalArg(ordinal);
                ordinal += 1;
                token
            }
            _ => {
                return Err(Error::UnrecognizedDirective {
                    directive: input[i..i + length].to_string(),
                    string: input.to_string(),
                });
            }
        };

        flush_literal(&mut out, literal_start, i);
        out.push(ScannedToken {
            offset: i,
            length,
            token,
        });
        i += length;
        literal_start = i;
    }
    flush_literal(&mut out, literal_start, bytes.len());

    if has_dollar {
        return Err(Error::AmbiguousDollarSign {
            string: input.to_string(),
        });
    }

    Ok(out)
}

/// Rewrites a printf-style string into numbered-variable form.
///
/// ```rust
/// use twbridge::placeholder::export_to_positional;
///
/// let out = export_to_positional("Deleted %d of %d files (%%)")?;
/// assert_eq!(out, "Deleted $1 of $2 files (%)");
/// # Ok::<(), twbridge::Error>(())
/// ```
pub fn export_to_positional(input: &str) -> Result<String, Error> {
    let patches: Vec<Patch> = scan_printf(input)?
        .into_iter()
        .filter_map(|t| {
            let replacement = match t.token {
                PrintfToken::Literal(_) => return None,
                PrintfToken::EscapedPercent => "%".to_string(),
                PrintfToken::PositionalArg(n) => format!("${}", n),
            };
            Some(Patch::new(t.offset, t.length, replacement))
        })
        .collect();

    Ok(apply_patches(input, &patches))
}

/// Rewrites a numbered-variable string (with markers already resolved) into
/// printf form.
///
/// The `k`-th reference becomes `%s` when it names argument `k` and `%N$s`
/// otherwise. `%d` placeholders that went through export come back as `%s`.
pub fn positional_to_printf(input: &str) -> String {
    let escaped = input.replace('%', "%%");

    let patches: Vec<Patch> = POSITIONAL_REGEX
        .captures_iter(&escaped)
        .enumerate()
        .filter_map(|(k, caps)| {
            let whole = caps.get(0)?;
            let digits = &caps[1];
            let replacement = match digits.parse::<usize>() {
                Ok(value) if value == k + 1 => "%s".to_string(),
                Ok(value) => format!("%{}$s", value),
                Err(_) => format!("%{}$s", digits),
            };
            Some(Patch::new(whole.start(), whole.len(), replacement))
        })
        .collect();

    apply_patches(&escaped, &patches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_basic() {
        assert_eq!(
            export_to_positional("Deleted %d of %d files (%%)").unwrap(),
            "Deleted $1 of $2 files (%)"
        );
    }

    #[test]
    fn test_export_shared_ordinal_counter() {
        assert_eq!(
            export_to_positional("%s edited %d files in %s").unwrap(),
            "$1 edited $2 files in $3"
        );
    }

    #[test]
    fn test_export_escaped_percent_does_not_consume_ordinal() {
        assert_eq!(
            export_to_positional("%%%s%%%d").unwrap(),
            "%$1%$2"
        );
    }

    #[test]
    fn test_export_plain_string() {
        assert_eq!(export_to_positional("No placeholders").unwrap(), "No placeholders");
        assert_eq!(export_to_positional("").unwrap(), "");
    }

    #[test]
    fn test_export_trailing_percent_is_literal() {
        assert_eq!(export_to_positional("100%").unwrap(), "100%");
        assert_eq!(export_to_positional("50%\nnext").unwrap(), "50%\nnext");
    }

    #[test]
    fn test_export_dollar_sign_is_rejected() {
        let err = export_to_positional("Cost: $5").unwrap_err();
        assert!(matches!(err, Error::AmbiguousDollarSign { ref string } if string == "Cost: $5"));
    }

    #[test]
    fn test_export_unrecognized_directive() {
        let err = export_to_positional("Value: %f").unwrap_err();
        match err {
            Error::UnrecognizedDirective { directive, string } => {
                assert_eq!(directive, "%f");
                assert_eq!(string, "Value: %f");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_export_positional_printf_is_unrecognized() {
        let err = export_to_positional("%1$s").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedDirective { ref directive, .. } if directive == "%1"));
    }

    #[test]
    fn test_export_directive_error_wins_over_dollar() {
        let err = export_to_positional("$ and %x").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedDirective { .. }));
    }

    #[test]
    fn test_export_multibyte_directive() {
        let err = export_to_positional("50%é").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedDirective { ref directive, .. } if directive == "%é"));
        assert_eq!(export_to_positional("Größe: %s").unwrap(), "Größe: $1");
    }

    #[test]
    fn test_tokenize_printf() {
        let tokens = tokenize_printf("a %s b %% c %d").unwrap();
        assert_eq!(
            tokens,
            vec![
                PrintfToken::Literal("a ".to_string()),
                PrintfToken::PositionalArg(1),
                PrintfToken::Literal(" b ".to_string()),
                PrintfToken::EscapedPercent,
                PrintfToken::Literal(" c ".to_string()),
                PrintfToken::PositionalArg(2),
            ]
        );
    }

    #[test]
    fn test_positional_in_order() {
        assert_eq!(positional_to_printf("$1 edited $2"), "%s edited %s");
    }

    #[test]
    fn test_positional_out_of_order() {
        assert_eq!(
            positional_to_printf("$2 was edited by $1"),
            "%2$s was edited by %1$s"
        );
    }

    #[test]
    fn test_positional_repeated_reference() {
        assert_eq!(positional_to_printf("$1 and $1"), "%s and %1$s");
    }

    #[test]
    fn test_positional_escapes_percent() {
        assert_eq!(positional_to_printf("$1 (100%)"), "%s (100%%)");
    }

    #[test]
    fn test_positional_bare_dollar_is_literal() {
        assert_eq!(positional_to_printf("$ and $x"), "$ and $x");
    }

    #[test]
    fn test_positional_ignores_non_ascii_digits() {
        assert_eq!(positional_to_printf("$١ and $1"), "$١ and %s");
        assert_eq!(positional_to_printf("$٢ $2 $1"), "$٢ %2$s %1$s");
    }

    #[test]
    fn test_positional_multidigit_index() {
        assert_eq!(positional_to_printf("$12"), "%12$s");
    }
}
