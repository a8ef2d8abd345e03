//! Reader for Go-style type expressions.
//!
//! Turns text such as `*[]string`, `[3]int32` or
//! `struct { X, Y float64; Tags []string }` into a [`TypeShape`]. Only the
//! shapes the resolver understands are accepted; `map`, `chan`, `func` and
//! `interface` types are rejected as unrecognized.

mod cursor;

use std::fmt;

use serde::Serialize;

use crate::shape::{Field, TypeShape};
use crate::span::Span;
use cursor::Cursor;

/// A type-expression error with the span it applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeParseError {
    pub kind: ShapeParseErrorKind,
    pub span: Span,
}

impl ShapeParseError {
    pub fn new(kind: ShapeParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ShapeParseErrorKind {
    /// A type form outside the closed shape set (map, chan, func, ...).
    UnrecognizedShape(String),
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    UnexpectedEnd { expected: &'static str },
    /// An array length that is not a non-negative integer literal.
    InvalidLength(String),
    DuplicateField(String),
    TrailingInput(String),
}

impl fmt::Display for ShapeParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedShape(form) => write!(f, "unrecognized native type: {form}"),
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found `{found}`")
            }
            Self::UnexpectedEnd { expected } => {
                write!(f, "expected {expected}, found end of input")
            }
            Self::InvalidLength(text) => write!(f, "invalid array length: {text}"),
            Self::DuplicateField(name) => write!(f, "duplicate field `{name}`"),
            Self::TrailingInput(text) => write!(f, "unexpected trailing input `{text}`"),
        }
    }
}

impl fmt::Display for ShapeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ShapeParseError {}

/// Parse one type expression.
pub fn parse_type(text: &str) -> Result<TypeShape, ShapeParseError> {
    let mut parser = Parser::new(text);
    let shape = parser.parse_shape()?;
    match parser.next() {
        None => Ok(shape),
        Some((_, span)) => {
            let rest = &text[span.start as usize..];
            Err(ShapeParseError::new(
                ShapeParseErrorKind::TrailingInput(rest.trim_end().to_string()),
                Span::new(span.start, text.len() as u32),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token<'src> {
    Ident(&'src str),
    Int(&'src str),
    Punct(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Int(s) => write!(f, "{s}"),
            Token::Punct(c) => write!(f, "{c}"),
        }
    }
}

fn tokenize(text: &str) -> Vec<(Token<'_>, Span)> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();
    loop {
        cursor.eat_while(char::is_whitespace);
        let start = cursor.pos();
        let Some(c) = cursor.advance() else {
            break;
        };
        let token = if c.is_alphabetic() || c == '_' {
            cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
            Token::Ident(cursor.slice(start, cursor.pos()))
        } else if c.is_ascii_digit() {
            cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            Token::Int(cursor.slice(start, cursor.pos()))
        } else {
            Token::Punct(c)
        };
        tokens.push((token, Span::new(start, cursor.pos())));
    }
    tokens
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Span)>,
    pos: usize,
    end: u32,
}

impl<'src> Parser<'src> {
    fn new(text: &'src str) -> Self {
        Self {
            tokens: tokenize(text),
            pos: 0,
            end: text.len() as u32,
        }
    }

    fn peek(&self) -> Option<&(Token<'src>, Span)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<(Token<'src>, Span)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn end_error(&self, expected: &'static str) -> ShapeParseError {
        ShapeParseError::new(
            ShapeParseErrorKind::UnexpectedEnd { expected },
            Span::new(self.end, self.end),
        )
    }

    fn expect_punct(&mut self, punct: char, expected: &'static str) -> Result<Span, ShapeParseError> {
        match self.next() {
            Some((Token::Punct(c), span)) if c == punct => Ok(span),
            Some((tok, span)) => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnexpectedToken {
                    expected,
                    found: tok.to_string(),
                },
                span,
            )),
            None => Err(self.end_error(expected)),
        }
    }

    fn eat_punct(&mut self, punct: char) -> bool {
        if matches!(self.peek(), Some((Token::Punct(c), _)) if *c == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_shape(&mut self) -> Result<TypeShape, ShapeParseError> {
        let Some((tok, span)) = self.next() else {
            return Err(self.end_error("a type"));
        };
        match tok {
            Token::Punct('*') => Ok(TypeShape::optional(self.parse_shape()?)),
            Token::Punct('[') => self.parse_sequence(span),
            Token::Ident("struct") => self.parse_record(),
            Token::Ident(kw @ ("map" | "chan" | "func" | "interface")) => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnrecognizedShape(format!("{kw} type")),
                span,
            )),
            Token::Ident(name) => self.parse_named(name, span),
            Token::Punct('(') => {
                let inner = self.parse_shape()?;
                self.expect_punct(')', "`)`")?;
                Ok(inner)
            }
            tok => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnexpectedToken {
                    expected: "a type",
                    found: tok.to_string(),
                },
                span,
            )),
        }
    }

    /// `name` or a package-qualified `pkg.Name`.
    fn parse_named(&mut self, name: &str, span: Span) -> Result<TypeShape, ShapeParseError> {
        if !self.eat_punct('.') {
            return Ok(TypeShape::named(name));
        }
        match self.next() {
            Some((Token::Ident(member), _)) => Ok(TypeShape::named(format!("{name}.{member}"))),
            Some((tok, span)) => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnexpectedToken {
                    expected: "a qualified type name",
                    found: tok.to_string(),
                },
                span,
            )),
            None => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnexpectedEnd {
                    expected: "a qualified type name",
                },
                span,
            )),
        }
    }

    /// After `[`: either `]T` or `N]T`.
    fn parse_sequence(&mut self, open: Span) -> Result<TypeShape, ShapeParseError> {
        if self.eat_punct(']') {
            return Ok(TypeShape::slice(self.parse_shape()?));
        }
        let len = match self.next() {
            Some((Token::Int(text), span)) => text.parse::<u64>().map_err(|_| {
                ShapeParseError::new(ShapeParseErrorKind::InvalidLength(text.to_string()), span)
            })?,
            Some((tok, span)) => {
                return Err(ShapeParseError::new(
                    ShapeParseErrorKind::InvalidLength(tok.to_string()),
                    open.merge(span),
                ))
            }
            None => return Err(self.end_error("an array length or `]`")),
        };
        self.expect_punct(']', "`]`")?;
        Ok(TypeShape::array(self.parse_shape()?, len))
    }

    /// After `struct`: `{ A, B T; C U }`.
    fn parse_record(&mut self) -> Result<TypeShape, ShapeParseError> {
        self.expect_punct('{', "`{`")?;
        let mut fields: Vec<Field> = Vec::new();
        loop {
            if self.eat_punct('}') {
                return Ok(TypeShape::record(fields));
            }
            if self.eat_punct(';') {
                continue;
            }
            let mut names = vec![self.parse_field_name()?];
            while self.eat_punct(',') {
                names.push(self.parse_field_name()?);
            }
            let shape = self.parse_shape()?;
            for (name, span) in names {
                if fields.iter().any(|f| f.name == name) {
                    return Err(ShapeParseError::new(
                        ShapeParseErrorKind::DuplicateField(name),
                        span,
                    ));
                }
                fields.push(Field::new(name, shape.clone()));
            }
            match self.peek() {
                Some((Token::Punct(';'), _)) | Some((Token::Punct('}'), _)) => {}
                Some((tok, span)) => {
                    return Err(ShapeParseError::new(
                        ShapeParseErrorKind::UnexpectedToken {
                            expected: "`;` or `}`",
                            found: tok.to_string(),
                        },
                        *span,
                    ))
                }
                None => return Err(self.end_error("`}`")),
            }
        }
    }

    fn parse_field_name(&mut self) -> Result<(String, Span), ShapeParseError> {
        match self.next() {
            Some((Token::Ident(name), span)) => Ok((name.to_string(), span)),
            Some((tok, span)) => Err(ShapeParseError::new(
                ShapeParseErrorKind::UnexpectedToken {
                    expected: "a field name",
                    found: tok.to_string(),
                },
                span,
            )),
            None => Err(self.end_error("a field name")),
        }
    }
}
