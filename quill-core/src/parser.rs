//! Reader: turns the token sequence into a single top-level list of forms.

use crate::error::Error;
use crate::lexer::{lex, Token, TokenKind};
use crate::value::Value;

/// Lex and parse a source text in one step.
pub fn parse_source(src: &str) -> Result<Value, Error> {
    parse(&lex(src)?)
}

/// Parse a token sequence into one `List` value holding the top-level
/// forms. The sequence must end with an `Eof` token, as `lex` guarantees.
pub fn parse(tokens: &[Token]) -> Result<Value, Error> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let items = parser.read_items()?;
    let line = items.first().map_or(-1, |v| v.line);
    Ok(Value::list(items, line))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: i32,
}

impl<'a> Parser<'a> {
    fn read_items(&mut self) -> Result<Vec<Value>, Error> {
        let mut items = Vec::new();
        loop {
            let tok = self.advance();
            match tok.kind {
                TokenKind::OpenParen => {
                    self.depth += 1;
                    let children = self.read_items()?;
                    let line = children.first().map_or(tok.line, |v| v.line);
                    items.push(Value::list(children, line));
                }
                TokenKind::CloseParen => {
                    self.depth -= 1;
                    if self.depth < 0 {
                        return Err(Error::parse("mismatched parentheses", tok.line));
                    }
                    return Ok(items);
                }
                TokenKind::Eof => {
                    if self.depth != 0 {
                        return Err(Error::parse("mismatched parentheses", self.previous_line()));
                    }
                    return Ok(items);
                }
                _ => items.push(atom(&tok)?),
            }
        }
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        self.pos += 1;
        tok
    }

    /// Line of the token before the one just consumed.
    fn previous_line(&self) -> i32 {
        self.pos
            .checked_sub(2)
            .and_then(|i| self.tokens.get(i))
            .map_or(-1, |t| t.line)
    }
}

fn atom(tok: &Token) -> Result<Value, Error> {
    match tok.kind {
        TokenKind::Int => {
            let n: i32 = tok.text.parse().map_err(|_| {
                Error::parse(
                    format!("integer literal '{}' is out of range", tok.text),
                    tok.line,
                )
            })?;
            Ok(Value::int(n, tok.line))
        }
        TokenKind::Float => {
            let x: f32 = tok.text.parse().map_err(|_| {
                Error::parse(format!("invalid float literal '{}'", tok.text), tok.line)
            })?;
            Ok(Value::float(x, tok.line))
        }
        TokenKind::Str => Ok(Value::string(tok.text.clone(), tok.line)),
        TokenKind::Char => Ok(Value::character(tok.text.clone(), tok.line)),
        TokenKind::Bool => Ok(Value::boolean(tok.text == "T", tok.line)),
        TokenKind::Ident => Ok(Value::ident(tok.text.clone(), tok.line)),
        TokenKind::OpenParen | TokenKind::CloseParen | TokenKind::Eof => Err(Error::parse(
            format!("unexpected token '{}'", tok.text),
            tok.line,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn parsing_atoms_works() {
        let program = parse_source("42 3.5 \"hi\" 'c' #T name").unwrap();
        assert_eq!(
            program,
            Value::list(
                vec![
                    Value::int(42, 1),
                    Value::float(3.5, 1),
                    Value::string("hi", 1),
                    Value::character("c", 1),
                    Value::boolean(true, 1),
                    Value::ident("name", 1),
                ],
                1,
            ),
        );
    }

    #[test]
    fn nested_lists_parse_structurally() {
        let program = parse_source("(a (b 1) ((c) 2))").unwrap();
        assert_eq!(
            program,
            Value::list(
                vec![Value::list(
                    vec![
                        Value::ident("a", 1),
                        Value::list(vec![Value::ident("b", 1), Value::int(1, 1)], 1),
                        Value::list(
                            vec![
                                Value::list(vec![Value::ident("c", 1)], 1),
                                Value::int(2, 1),
                            ],
                            1,
                        ),
                    ],
                    1,
                )],
                1,
            ),
        );
    }

    #[test]
    fn lists_adopt_the_line_of_their_first_element() {
        let program = parse_source("(\na\nb)").unwrap();
        let form = program.item(0).unwrap();
        assert!(form.is_list());
        assert_eq!(form.line, 2);
        assert_eq!(form.item(1).unwrap().line, 3);
    }

    #[test]
    fn empty_program_is_an_empty_list() {
        let program = parse_source("").unwrap();
        assert!(matches!(&program.kind, ValueKind::List(items) if items.is_empty()));
        assert_eq!(program.line, -1);
    }

    #[test]
    fn unmatched_close_paren_is_reported_on_its_line() {
        let err = parse_source("(a)\n)").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert!(err.to_string().contains("mismatched parentheses"));
    }

    #[test]
    fn unmatched_open_paren_is_reported_on_the_last_token_line() {
        let err = parse_source("(a\n(b").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn integer_overflow_is_a_parse_error() {
        let err = parse_source("99999999999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn balanced_inputs_parse_without_error() {
        for src in ["()", "(() ())", "a (b (c (d)))", "((((x))))"] {
            assert!(parse_source(src).is_ok(), "{src} should parse");
        }
    }
}
