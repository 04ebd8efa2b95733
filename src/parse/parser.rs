use super::{ast::*, error::*, lexer::*};
use crate::common::*;
use crate::limits::Limits;
use crate::Error;
use logos_iter::LogosIter;

type PResult<T> = Result<T, Error>;

pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Star, TokenKind::Slash];

    const ATOM_START: &'static [TokenKind] =
        &[TokenKind::Integer, TokenKind::Dice, TokenKind::LeftParen];

    const AFTER_OPERAND: &'static [TokenKind] = &[
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
    ];

    /// Deepest parenthesis nesting accepted.
    pub const MAX_DEPTH: usize = Limits::DEFAULT_MAX_DEPTH;

    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: lexer(source),
            depth: 0,
        }
    }

    pub fn parse(mut self) -> PResult<Expression> {
        let expr = self.parse_expression()?;
        match self.advance()? {
            None => Ok(expr),
            Some(TokenKind::RightParen) => self.error(ParseErrorKind::UnmatchedParen),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken {
                found,
                expected: Self::AFTER_OPERAND.to_vec(),
            }),
        }
    }

    fn advance(&mut self) -> PResult<Option<TokenKind>> {
        match self.lexer.next() {
            Some(TokenKind::Error) => {
                Err(SyntaxError::new(self.lexer.span().start, self.lexer.slice()).into())
            }
            other => Ok(other),
        }
    }

    fn match_operator(&mut self, options: &[TokenKind]) -> Option<Operator> {
        self.lexer
            .peek()
            .filter(|peeked| options.contains(peeked))
            .and_then(TokenKind::as_operator)
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        }
        .into())
    }

    fn error_at_end<T>(&self, kind: ParseErrorKind) -> PResult<T> {
        let end = self.source.len();
        Err(ParseError {
            kind,
            span: end..end,
            slice: String::new(),
        }
        .into())
    }

    fn parse_expression(&mut self) -> PResult<Expression> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();

        while let Some(op) = self.match_operator(Self::ADDITION_OPS) {
            self.advance()?;
            rest.push((op, self.parse_term()?));
        }

        Ok(Expression::new(first, rest))
    }

    fn parse_term(&mut self) -> PResult<Term> {
        let first = self.parse_atom()?;
        let mut rest = Vec::new();

        while let Some(op) = self.match_operator(Self::MULTIPLICATION_OPS) {
            self.advance()?;
            rest.push((op, self.parse_atom()?));
        }

        Ok(Term::new(first, rest))
    }

    fn parse_atom(&mut self) -> PResult<Atom> {
        match self.advance()? {
            Some(TokenKind::Integer) => self.parse_integer(),
            Some(TokenKind::Dice) => self.parse_dice(),
            Some(TokenKind::LeftParen) => self.parse_group(),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken {
                found,
                expected: Self::ATOM_START.to_vec(),
            }),
            None => self.error_at_end(ParseErrorKind::UnexpectedEnd {
                expected: Self::ATOM_START.to_vec(),
            }),
        }
    }

    fn parse_integer(&mut self) -> PResult<Atom> {
        let parsed = self.lexer.slice().parse::<Int>();
        match parsed {
            Ok(x) => Ok(Atom::constant(x)),
            Err(e) => self.error(ParseErrorKind::InvalidNumber(e)),
        }
    }

    fn parse_dice(&mut self) -> PResult<Atom> {
        let lexeme = self.lexer.slice().to_string();
        match lexeme.parse::<DiceRollSpec>() {
            Ok(spec) => Ok(Atom::dice(spec, lexeme)),
            Err(e) => self.error(ParseErrorKind::InvalidDice(e)),
        }
    }

    fn parse_group(&mut self) -> PResult<Atom> {
        let open = self.lexer.span().start;
        if self.depth == Self::MAX_DEPTH {
            return self.error(ParseErrorKind::TooDeep {
                limit: Self::MAX_DEPTH,
            });
        }

        self.depth += 1;
        let inner = self.parse_expression()?;
        self.depth -= 1;

        match self.advance()? {
            Some(TokenKind::RightParen) => Ok(Atom::group(inner)),
            Some(found) => {
                let mut expected = vec![TokenKind::RightParen];
                expected.extend_from_slice(Self::AFTER_OPERAND);
                self.error(ParseErrorKind::UnexpectedToken { found, expected })
            }
            None => self.error_at_end(ParseErrorKind::UnclosedParen { open }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn d(s: &str) -> Atom {
        Atom::dice(s.parse().unwrap(), s)
    }

    fn n(x: Int) -> Atom {
        Atom::constant(x)
    }

    fn term(first: Atom, rest: Vec<(Operator, Atom)>) -> Term {
        Term::new(first, rest)
    }

    fn check(s: &str, expected: Expression) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed, expected);
    }

    fn check_parse_err(s: &str, position: usize, kind: ParseErrorKind) {
        match parse(s) {
            Err(Error::Parse(e)) => {
                assert_eq!(e.kind, kind, "{}", s);
                assert_eq!(e.position(), position, "{}", s);
            }
            other => panic!("expected parse error for {:?}, got {:?}", s, other),
        }
    }

    #[test]
    fn test_parse_atoms() {
        check("32", n(32).into());
        check("3d6", d("3d6").into());
        check("mid20", d("mid20").into());
        check("MiD20", d("MiD20").into());
        check("4dF", d("4dF").into());
        check("(2)", Atom::group(n(2).into()).into());
    }

    #[test]
    fn test_parse_dice_spec() {
        let parsed = parse("2D8").unwrap();
        match parsed.first().first() {
            Atom::Dice(dice) => {
                assert_eq!(dice.spec, DiceRollSpec::standard(2, Faces::Poly(8)));
                assert_eq!(dice.lexeme, "2D8");
            }
            other => panic!("expected dice, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_precedence() {
        check(
            "1 + 2 * 3",
            Expression::new(
                n(1).into(),
                vec![(Operator::Add, term(n(2), vec![(Operator::Mul, n(3))]))],
            ),
        );
        check(
            "4d6*2-1/1d4",
            Expression::new(
                term(d("4d6"), vec![(Operator::Mul, n(2))]),
                vec![(Operator::Sub, term(n(1), vec![(Operator::Div, d("1d4"))]))],
            ),
        );
    }

    #[test]
    fn test_parse_left_assoc() {
        check(
            "1 - 2 - 3",
            Expression::new(
                n(1).into(),
                vec![(Operator::Sub, n(2).into()), (Operator::Sub, n(3).into())],
            ),
        );
    }

    #[test]
    fn test_parse_groups() {
        check(
            "(3d6 + 2) * 2",
            Expression::new(
                term(
                    Atom::group(Expression::new(
                        d("3d6").into(),
                        vec![(Operator::Add, n(2).into())],
                    )),
                    vec![(Operator::Mul, n(2))],
                ),
                vec![],
            ),
        );
    }

    #[test]
    fn test_zero_dice_accepted() {
        check("0d6", d("0d6").into());
        check("mid0", d("mid0").into());
    }

    #[test]
    fn test_parse_errors() {
        use TokenKind::*;

        check_parse_err("", 0, ParseErrorKind::UnexpectedEnd {
            expected: vec![Integer, Dice, LeftParen],
        });
        check_parse_err("3d6 +", 5, ParseErrorKind::UnexpectedEnd {
            expected: vec![Integer, Dice, LeftParen],
        });
        check_parse_err("2 * * 3", 4, ParseErrorKind::UnexpectedToken {
            found: Star,
            expected: vec![Integer, Dice, LeftParen],
        });
        check_parse_err("(3d6 + 2", 8, ParseErrorKind::UnclosedParen { open: 0 });
        check_parse_err("3d6)", 3, ParseErrorKind::UnmatchedParen);
        check_parse_err("3 4", 2, ParseErrorKind::UnexpectedToken {
            found: Integer,
            expected: vec![Plus, Minus, Star, Slash],
        });
        check_parse_err("(1 2)", 3, ParseErrorKind::UnexpectedToken {
            found: Integer,
            expected: vec![RightParen, Plus, Minus, Star, Slash],
        });
        check_parse_err("()", 1, ParseErrorKind::UnexpectedToken {
            found: RightParen,
            expected: vec![Integer, Dice, LeftParen],
        });
    }

    #[test]
    fn test_parse_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        let expr = parse(&nested(Parser::MAX_DEPTH)).unwrap();
        assert_eq!(expr.depth(), Parser::MAX_DEPTH);

        let limit = Parser::MAX_DEPTH;
        check_parse_err(&nested(limit + 1), limit, ParseErrorKind::TooDeep { limit });
        check_parse_err(&nested(100_000), limit, ParseErrorKind::TooDeep { limit });
        assert!(crate::DiceProb::new(&nested(20_000)).is_err());
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = parse("99999999999999999999").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                kind: ParseErrorKind::InvalidNumber(_),
                ..
            })
        ));

        let err = parse("1 + 99999999999999999999d6").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                kind: ParseErrorKind::InvalidDice(ParseDiceError::InvalidCount(_)),
                span,
                ..
            }) if span == (4..26)
        ));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            parse("3d6 + x").unwrap_err(),
            Error::Syntax(SyntaxError::new(6, "x"))
        );
        assert!(matches!(
            parse("2 % 3").unwrap_err(),
            Error::Syntax(SyntaxError { position: 2, .. })
        ));
    }
}
