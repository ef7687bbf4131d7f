//! Tokeniser: turns source text into a flat token sequence.
//!
//! A single pass over the characters with one lookahead. Each buffering
//! state (identifier, number, string, char, boolean) runs until a
//! character it does not accept, which is then reprocessed by the start
//! state. The sequence always ends with an `Eof` token.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::Error;

/// Identifier symbol characters, beyond Unicode letters and digits.
const IDENT_SYMBOLS: &[char] = &[
    '+', '-', '*', '/', '<', '>', '=', '!', '?', '£', '$', '€', '%', '^', '&', '@',
];

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || IDENT_SYMBOLS.contains(&ch)
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_numeric()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Ident,
    Int,
    Float,
    Str,
    Char,
    Bool,
    Eof,
}

/// One token: kind, literal text (escapes already processed), and the
/// line its first character appeared on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: i32,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: i32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Tokenise a whole source text.
pub fn lex(src: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(src);
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: i32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            chars: src.chars().peekable(),
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), Error> {
        while let Some(ch) = self.peek() {
            match ch {
                c if c.is_whitespace() => {
                    self.bump();
                }
                ';' => self.comment(),
                '(' => {
                    self.tokens.push(Token::new(TokenKind::OpenParen, "(", self.line));
                    self.bump();
                }
                ')' => {
                    self.tokens.push(Token::new(TokenKind::CloseParen, ")", self.line));
                    self.bump();
                }
                c if c.is_ascii_digit() => self.number()?,
                c if is_ident_start(c) => self.ident(),
                '"' => self.quoted(TokenKind::Str, '"'),
                '\'' => self.quoted(TokenKind::Char, '\''),
                '#' => self.boolean()?,
                c => {
                    return Err(Error::parse(
                        format!("unrecognised character '{c}'"),
                        self.line,
                    ))
                }
            }
        }
        self.tokens.push(Token::new(TokenKind::Eof, "", -1));
        Ok(())
    }

    /// `;` to end of line.
    fn comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<(), Error> {
        let line = self.line;
        let mut buf = String::new();
        let mut seen_dot = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.bump();
            } else if ch == '.' {
                if seen_dot {
                    return Err(Error::parse(
                        "a second '.' character in a float literal is illegal",
                        self.line,
                    ));
                }
                seen_dot = true;
                buf.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        let kind = if seen_dot { TokenKind::Float } else { TokenKind::Int };
        self.tokens.push(Token::new(kind, buf, line));
        Ok(())
    }

    fn ident(&mut self) {
        let line = self.line;
        let mut buf = String::new();
        while let Some(ch) = self.peek() {
            if is_ident_char(ch) {
                buf.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        self.tokens.push(Token::new(TokenKind::Ident, buf, line));
    }

    /// String and char literals share the delimiter/escape machinery;
    /// only the closing quote differs.
    fn quoted(&mut self, kind: TokenKind, close: char) {
        let line = self.line;
        self.bump(); // opening delimiter
        let mut buf = String::new();
        loop {
            match self.bump() {
                None => {
                    // Input ended inside the literal; emit what was read.
                    if !buf.is_empty() {
                        self.tokens.push(Token::new(kind, buf, line));
                    }
                    return;
                }
                Some('\\') => match self.bump() {
                    Some('"') => buf.push('"'),
                    Some('\\') => buf.push('\\'),
                    Some('n') => buf.push('\n'),
                    Some('r') => buf.push('\r'),
                    Some('t') => buf.push('\t'),
                    // Unrecognised escapes are dropped.
                    Some(_) | None => {}
                },
                Some(ch) if ch == close => {
                    self.tokens.push(Token::new(kind, buf, line));
                    return;
                }
                Some(ch) => buf.push(ch),
            }
        }
    }

    /// `#T` or `#F`; anything else after `#` is an error.
    fn boolean(&mut self) -> Result<(), Error> {
        let line = self.line;
        self.bump(); // '#'
        match self.bump() {
            Some(c @ ('T' | 'F')) => {
                self.tokens.push(Token::new(TokenKind::Bool, c, line));
                Ok(())
            }
            Some(c) => Err(Error::parse(
                format!("#{c} is an invalid boolean literal; use #T or #F"),
                line,
            )),
            None => Ok(()),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}
