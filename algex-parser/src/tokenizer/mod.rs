pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the non-whitespace tokens produced by the tokenizer.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // every character is matched by at least `Symbol`
        let kind = result.unwrap_or(TokenKind::Symbol);
        if kind.is_whitespace() {
            continue;
        }

        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    log::debug!("tokenized {} token(s)", tokens.len());
    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn root_and_groups() {
        compare_tokens(
            "[a_1 v 3]*f(X2)",
            [
                (TokenKind::OpenBracket, "["),
                (TokenKind::Name, "a_1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "v"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "3"),
                (TokenKind::CloseBracket, "]"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "f"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "X2"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn decimals_and_symbols() {
        compare_tokens(
            "2.5 $",
            [
                (TokenKind::Float, "2.5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_drops_whitespace() {
        let tokens = tokenize_complete(" x  =\t1 ");
        assert_eq!(
            tokens.iter().map(|token| (token.kind, token.span.clone())).collect::<Vec<_>>(),
            vec![(TokenKind::Name, 1..2), (TokenKind::Eq, 4..5), (TokenKind::Int, 6..7)],
        );
        assert!(!tokens[0].is_root());
    }
}
