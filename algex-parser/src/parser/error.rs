use algex_attrs::ErrorKind;
use algex_error::{ErrorKind, EXPR};
use ariadne::Fmt;

/// The input contains no expression at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to parse",
    labels = ["I expected to see an expression here"],
)]
pub struct EmptyExpression;

/// A grouping delimiter was not closed, or closed without being opened.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unclosed {}", if *bracket { "bracket" } else { "parenthesis" }),
    labels = [if *opening {
        "this delimiter is not closed"
    } else {
        "this delimiter closes nothing"
    }],
    help = match (*opening, *bracket) {
        (true, false) => "add a closing parenthesis `)` somewhere after this",
        (false, false) => "add an opening parenthesis `(` somewhere before this",
        (true, true) => "add a closing bracket `]` somewhere after this",
        (false, true) => "add an opening bracket `[` somewhere before this",
    },
)]
pub struct UnclosedGroup {
    /// Whether the delimiter was an opening delimiter. Otherwise, it was a closing delimiter.
    pub opening: bool,

    /// Whether the delimiter was a bracket. Otherwise, it was a parenthesis.
    pub bracket: bool,
}

/// Parentheses and brackets cross each other, as in `[a(b]c)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "mismatched grouping delimiters",
    labels = ["this group", "is crossed by this delimiter"],
    help = format!("close the inner {} before closing the outer one", "group".fg(EXPR)),
)]
pub struct MismatchedGroup;

/// An operator is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand for `{}`", operator),
    labels = [format!("I expected to see an {} around this operator", "expression".fg(EXPR))],
)]
pub struct EmptyOperand {
    /// The operator missing an operand.
    pub operator: String,
}

/// There was no expression inside a pair of grouping delimiters.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing expression inside `{}`", group),
    labels = ["add an expression here"],
)]
pub struct EmptyGroup {
    /// The source text of the empty group.
    pub group: String,
}

/// Two operands follow each other without an operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operator between `{}` and `{}`", lhs, rhs),
    labels = ["this operand", "is followed by this operand"],
    help = format!("write the multiplication explicitly: `{}*{}`", lhs, rhs),
)]
pub struct MissingOperator {
    /// The source text of the first operand.
    pub lhs: String,

    /// The source text of the second operand.
    pub rhs: String,
}

/// A character that is not part of the grammar was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized token `{}`", lexeme),
    labels = ["here"],
    help = "expressions may only contain names, integers, `= , + - / * ^ v`, parentheses and brackets",
)]
pub struct UnrecognizedToken {
    /// The unrecognized source text.
    pub lexeme: String,
}

/// A decimal literal was used, but only integer literals are accepted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("decimal literal `{}` is not supported", lexeme),
    labels = ["this number"],
    help = format!("write it as a fraction of integers instead, such as {}", fraction.fg(EXPR)),
)]
pub struct DecimalLiteral {
    /// The source text of the literal.
    pub lexeme: String,

    /// An equivalent fraction of integer literals, such as `25/10` for `2.5`.
    pub fraction: String,
}

impl DecimalLiteral {
    /// Creates the error for the given literal.
    pub fn new(lexeme: &str) -> Self {
        let (whole, decimals) = lexeme.split_once('.').unwrap_or((lexeme, ""));
        let fraction = if decimals.is_empty() {
            whole.to_string()
        } else {
            format!("{}{}/1{}", whole, decimals, "0".repeat(decimals.len()))
        };
        Self { lexeme: lexeme.to_string(), fraction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimal_fraction() {
        assert_eq!(DecimalLiteral::new("2.5").fraction, "25/10");
        assert_eq!(DecimalLiteral::new("0.125").fraction, "0125/1000");
        assert_eq!(DecimalLiteral::new("3.").fraction, "3");
    }

    #[test]
    fn messages() {
        assert_eq!(
            UnclosedGroup { opening: true, bracket: true }.message(),
            "unclosed bracket",
        );
        assert_eq!(
            MissingOperator { lhs: "2".to_string(), rhs: "x".to_string() }.message(),
            "missing operator between `2` and `x`",
        );
    }
}
