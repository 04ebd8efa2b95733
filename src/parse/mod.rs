pub mod ast;
mod error;
mod lexer;
mod parser;
pub mod visit;

pub use error::{ParseError, ParseErrorKind, SyntaxError};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::Parser;

pub fn parse(s: &str) -> crate::Result<ast::Expression> {
    Parser::new(s).parse()
}
