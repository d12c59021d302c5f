//! The expression parser.
//!
//! A name immediately followed by a parenthesized group is a function call, as in `max(a, b)`.
//! Only parentheses form calls: a name followed by a bracketed group, such as `f[x]`, is two
//! operands with no operator between them, and fails with
//! [`MissingOperator`](error::MissingOperator).

pub mod error;
pub mod group;
pub mod op;
mod split;

use algex_error::Error;
use algex_expr::Expr;
use ariadne::{Report, Source};
use error::{DecimalLiteral, EmptyExpression, UnrecognizedToken};
use group::{Fragment, Item};
use std::{fmt, ops::Range};
use super::tokenizer::{tokenize_complete, TokenKind};

/// The name of the source used in reports.
const SOURCE_ID: &str = "input";

/// A parser for the textual expression grammar.
///
/// Parsing happens in two phases: grouped fragments are extracted first (see [`group`]), then the
/// flat remainder is split by operators from the weakest level to the strongest, recursing into
/// the extracted fragments as they are reached.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source being parsed.
    source: &'source str,

    /// The fragments extracted so far.
    fragments: Vec<Fragment<'source>>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self { source, fragments: Vec::new() }
    }

    /// Returns the source text covered by the given span.
    pub fn text(&self, span: Range<usize>) -> &'source str {
        self.source.get(span).unwrap_or_default()
    }

    /// Parses the whole source into an expression.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        let tokens = tokenize_complete(self.source);

        // tokens that can never be part of a valid expression are reported first, wherever they
        // appear
        for token in tokens.iter() {
            match token.kind {
                TokenKind::Symbol => return Err(Error::new(
                    vec![token.span.clone()],
                    UnrecognizedToken { lexeme: token.lexeme.to_string() },
                )),
                TokenKind::Float => return Err(Error::new(
                    vec![token.span.clone()],
                    DecimalLiteral::new(token.lexeme),
                )),
                _ => {},
            }
        }

        if tokens.is_empty() {
            let end = self.source.len();
            return Err(Error::new(vec![end..end], EmptyExpression));
        }

        let items = tokens.into_vec().into_iter().map(Item::Token).collect();
        let items = group::extract(items, &mut self.fragments)?;
        let expr = self.split(&items, op::LEVELS[0])?;
        log::debug!("parsed {} group(s) into {} node(s)", self.fragments.len(), expr.node_count());
        Ok(expr)
    }
}

/// An error produced while parsing, together with the source it was produced from.
#[derive(Debug)]
pub struct ParseError {
    /// The source that failed to parse.
    pub source: String,

    /// The error itself.
    pub error: Error,
}

impl ParseError {
    /// Returns the source text of the first region the error points at.
    pub fn fragment(&self) -> &str {
        self.error.spans
            .first()
            .and_then(|span| self.source.get(span.clone()))
            .unwrap_or_default()
    }

    /// Build a report from this error.
    pub fn build_report(&self) -> Report<(&'static str, Range<usize>)> {
        self.error.build_report(SOURCE_ID)
    }

    /// Renders the report into a [`String`], with ANSI color codes.
    pub fn render(&self) -> String {
        self.error.render(SOURCE_ID, &self.source)
    }

    /// Prints the report to stderr.
    pub fn report_to_stderr(&self) -> std::io::Result<()> {
        self.build_report().eprint((SOURCE_ID, Source::from(self.source.as_str())))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ParseError {}

/// Parses the given text into an expression tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source)
        .parse()
        .map_err(|error| ParseError { source: source.to_string(), error })
}
