use super::error::SyntaxError;
use crate::common::Operator;
use logos::Logos;
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;
use std::ops::Range;

pub(crate) type Lexer<'a> = PeekableLexer<'a, logos::Lexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer<'_> {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"([0-9]+|[mM][iI])[dD]([0-9]+|[fF])")]
    Dice,
    #[regex(r"[0-9]+")]
    Integer,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn to_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Dice => "<dice>",
            Integer => "<integer>",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LeftParen => "'('",
            RightParen => "')'",
            Error => "<error>",
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        Some(match self {
            Self::Plus => Operator::Add,
            Self::Minus => Operator::Sub,
            Self::Star => Operator::Mul,
            Self::Slash => Operator::Div,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub span: Range<usize>,
}

/// Splits `s` into tokens, left to right, skipping whitespace.
pub fn tokenize(s: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    TokenKind::lexer(s)
        .spanned()
        .map(|(kind, span)| {
            let lexeme = &s[span.clone()];
            if kind == TokenKind::Error {
                Err(SyntaxError::new(span.start, lexeme))
            } else {
                Ok(Token { kind, lexeme, span })
            }
        })
        .collect()
}
