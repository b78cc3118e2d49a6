//! Numeric text parsing.
//!
//! Turns a free-form block of user text into `f64` values. Items are
//! separated by newlines; the decimal marker may be a period or a comma.
//!
//! # Separator grammar
//!
//! Line by line:
//!
//! 1. a comma followed by a blank (space or tab) always separates items,
//!    so `15,2, 16,1, 17.0` is three values;
//! 2. blanks (spaces, tabs, carriage returns) are then removed;
//! 3. in each remaining piece without a period, every comma is a decimal
//!    marker (`1,5` is `1.5`, and `1,234` is `1.234`, never one thousand
//!    two hundred thirty-four);
//! 4. a piece with a period splits on its commas only if every item it
//!    yields has a period of its own (`1.5,2.5,3.5` is three values).
//!
//! Anything else mixes the two conventions and is rejected as one token:
//! `1.234,5` could be `[1.234, 5]` or a mistyped `1234.5`, and `1,2,3`
//! could be three integers or nothing at all. Integer lists must be
//! written one per line or with `, ` between items.
//!
//! # Examples
//!
//! ```
//! use u_normality::parse::parse;
//!
//! assert_eq!(parse("1.5, 2.5, 3.5").unwrap(), vec![1.5, 2.5, 3.5]);
//! assert_eq!(parse("1,5\n2,5\n3,5").unwrap(), vec![1.5, 2.5, 3.5]);
//!
//! let err = parse("1.2, abc, 3.4").unwrap_err();
//! assert_eq!(err.token, "abc");
//! ```

use thiserror::Error;
use tracing::debug;

/// A token that could not be read as a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number '{token}' at position {position}")]
pub struct ParseFailure {
    /// The offending token, as the user typed it (blanks removed).
    pub token: String,
    /// 1-based index of the token among the non-empty tokens.
    pub position: usize,
}

/// Parses a raw text block into numbers, in input order.
///
/// Empty tokens (e.g. blank lines, trailing separators) are skipped. The
/// first token that is not a finite number fails the whole parse; no
/// partial result is ever returned.
pub fn parse(raw: &str) -> Result<Vec<f64>, ParseFailure> {
    let mut values = Vec::new();

    for (index, token) in tokens(raw).enumerate() {
        let position = index + 1;
        let normalized = token.replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => {
                debug!(%token, position, "rejected token");
                return Err(ParseFailure {
                    token: token.to_string(),
                    position,
                });
            }
        }
    }

    debug!(count = values.len(), "parsed numeric input");
    Ok(values)
}

/// Splits the text into non-empty raw tokens, following the separator
/// grammar described at module level. Tokens keep the decimal marker the
/// user typed; an ambiguous piece comes back whole and fails to parse.
pub fn tokens(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split('\n')
        .flat_map(split_listed)
        .flat_map(|piece| {
            let compact: String = piece.chars().filter(|c| !is_blank(*c)).collect();
            split_point_list(compact)
        })
        .filter(|t| !t.is_empty())
}

// Comma + blank is always an item separator
fn split_listed(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == ',' && chars.peek().is_some_and(|&(_, next)| is_blank(next)) {
            parts.push(&line[start..i]);
            start = i + 1;
        }
    }
    parts.push(&line[start..]);
    parts
}

fn split_point_list(piece: String) -> Vec<String> {
    if !piece.contains('.') || !piece.contains(',') {
        return vec![piece];
    }
    let items: Vec<&str> = piece.split(',').filter(|t| !t.is_empty()).collect();
    if items.iter().all(|t| t.contains('.')) {
        items.into_iter().map(str::to_string).collect()
    } else {
        vec![piece]
    }
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Separators
    // -----------------------------------------------------------------------

    #[test]
    fn period_decimals_comma_separated() {
        assert_eq!(parse("1.5,2.5,3.5").expect("parse"), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn comma_decimals_newline_separated() {
        assert_eq!(parse("1,5\n2,5\n3,5").expect("parse"), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn both_forms_agree() {
        let a = parse("1.5,2.5,3.5").expect("parse");
        let b = parse("1,5\n2,5\n3,5").expect("parse");
        assert_eq!(a, b);
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(parse("1,25\r\n2,75\r\n").expect("parse"), vec![1.25, 2.75]);
    }

    #[test]
    fn blanks_are_removed_inside_tokens() {
        assert_eq!(parse("  1 2.5 ,\t3.0 ").expect("parse"), vec![12.5, 3.0]);
    }

    #[test]
    fn mixed_lines() {
        let v = parse("14,5\n15.2, 16.1\n17").expect("parse");
        assert_eq!(v, vec![14.5, 15.2, 16.1, 17.0]);
    }

    #[test]
    fn comma_blank_separates_decimal_comma_values() {
        assert_eq!(parse("15,2, 16,1, 17.0").expect("parse"), vec![15.2, 16.1, 17.0]);
        assert_eq!(parse("1,5,\t2,5").expect("parse"), vec![1.5, 2.5]);
    }

    #[test]
    fn integers_after_comma_blank() {
        assert_eq!(parse("1, 2, 3").expect("parse"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn lone_comma_is_decimal_marker() {
        // no thousands separator support
        assert_eq!(parse("1,234").expect("parse"), vec![1.234]);
    }

    #[test]
    fn integers_one_per_line() {
        assert_eq!(parse("1\n2\n3").expect("parse"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_tokens_skipped() {
        assert_eq!(parse("1.0,,2.0,\n\n3.0\n").expect("parse"), vec![1.0, 2.0, 3.0]);
        assert!(parse("").expect("parse").is_empty());
        assert!(parse("  \n \n").expect("parse").is_empty());
    }

    #[test]
    fn negative_and_exponent() {
        assert_eq!(parse("-1.5, 2e3, +0.25").expect("parse"), vec![-1.5, 2000.0, 0.25]);
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[test]
    fn malformed_token_reported() {
        let raw = "1.2, abc, 3.4, 4.5, 5.6, 6.7, 7.8, 8.9, 9.0, 10.1, 11.2";
        let err = parse(raw).expect_err("abc is not a number");
        assert_eq!(err.token, "abc");
        assert_eq!(err.position, 2);
    }

    #[test]
    fn multiple_commas_without_period_rejected() {
        let err = parse("1,2,3").expect_err("ambiguous");
        assert_eq!(err.token, "1,2,3");
        assert_eq!(err.position, 1);
    }

    #[test]
    fn mixed_markers_rejected() {
        let err = parse("1.234,5").expect_err("ambiguous");
        assert_eq!(err.token, "1.234,5");
        assert_eq!(err.position, 1);

        let err = parse("1.0\n2,5.5").expect_err("ambiguous");
        assert_eq!(err.token, "2,5.5");
        assert_eq!(err.position, 2);
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(parse("1.0\ninf").expect_err("inf").token, "inf");
        assert_eq!(parse("NaN\n1.0").expect_err("nan").token, "NaN");
    }

    #[test]
    fn failure_message_names_token() {
        let err = parse("1.0\nx1").expect_err("x1");
        assert_eq!(err.to_string(), "invalid number 'x1' at position 2");
    }
}
