//! Token-stream primitives for drawing persistence
//!
//! The persisted format is a flat stream of whitespace-separated tokens:
//! quoted strings (markers, key names, type tags, text values) and decimal
//! integers. Codecs pull typed tokens off a [`TokenReader`] and push them
//! onto a [`TokenWriter`]; nested values delegate to their own codec
//! mid-stream.

use ariadne::{Color, Label, Report, ReportKind, Source};
use logos::Logos;
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors surfaced while decoding a token stream
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// Input that does not lex as a quoted string or integer
    #[error("unreadable token")]
    InvalidToken { span: Span },

    /// Leading marker token did not match; the whole read is abandoned
    #[error("expected \"{expected}\" marker, found \"{found}\"")]
    BadMarker {
        expected: &'static str,
        found: String,
        span: Span,
    },

    /// A type-name token that no decoder recognizes
    #[error("unknown type tag \"{name}\"")]
    UnknownType { name: String, span: Span },

    #[error("figure index {index} out of range for {count} figures")]
    BadFigureIndex {
        index: usize,
        count: usize,
        span: Option<Span>,
    },
}

impl StoreError {
    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UnexpectedToken { span, .. } => Some(span),
            Self::InvalidToken { span } => Some(span),
            Self::BadMarker { span, .. } => Some(span),
            Self::UnknownType { span, .. } => Some(span),
            Self::BadFigureIndex { span, .. } => span.as_ref(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().cloned().unwrap_or(0..0);
        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token {
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Int(i32),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len() - 1])
    })]
    Str(String),
}

fn describe(token: &Token) -> String {
    match token {
        Token::Int(n) => format!("number {}", n),
        Token::Str(s) => format!("string \"{}\"", s),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Pull-reader over a token stream
pub struct TokenReader<'a> {
    tokens: std::iter::Peekable<logos::SpannedIter<'a, Token>>,
    last_span: Span,
}

impl<'a> TokenReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: Token::lexer(source).spanned().peekable(),
            last_span: 0..0,
        }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<Token, StoreError> {
        match self.tokens.next() {
            None => Err(StoreError::UnexpectedEof { expected }),
            Some((Err(()), span)) => {
                self.last_span = span.clone();
                Err(StoreError::InvalidToken { span })
            }
            Some((Ok(token), span)) => {
                self.last_span = span;
                Ok(token)
            }
        }
    }

    /// Read the next token as an integer
    pub fn read_int(&mut self) -> Result<i32, StoreError> {
        match self.next_token("a number")? {
            Token::Int(n) => Ok(n),
            other => Err(StoreError::UnexpectedToken {
                expected: "a number",
                found: describe(&other),
                span: self.last_span.clone(),
            }),
        }
    }

    /// Read the next token as a quoted string
    pub fn read_string(&mut self) -> Result<String, StoreError> {
        match self.next_token("a string")? {
            Token::Str(s) => Ok(s),
            other => Err(StoreError::UnexpectedToken {
                expected: "a string",
                found: describe(&other),
                span: self.last_span.clone(),
            }),
        }
    }

    /// Span of the most recently consumed token
    pub fn last_span(&self) -> Span {
        self.last_span.clone()
    }

    /// True once every token has been consumed
    pub fn is_at_end(&mut self) -> bool {
        self.tokens.peek().is_none()
    }
}

/// Push-writer producing the token stream text
#[derive(Debug)]
pub struct TokenWriter {
    out: String,
    at_line_start: bool,
}

impl TokenWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            at_line_start: true,
        }
    }

    fn separate(&mut self) {
        if !self.at_line_start {
            self.out.push(' ');
        }
        self.at_line_start = false;
    }

    /// Write a quoted, escaped string token
    pub fn write_string(&mut self, value: &str) {
        self.separate();
        self.out.push('"');
        self.out.push_str(&escape(value));
        self.out.push('"');
    }

    /// Write a decimal integer token
    pub fn write_int(&mut self, value: i32) {
        self.separate();
        self.out.push_str(&value.to_string());
    }

    /// End the current line; purely cosmetic in the format
    pub fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for TokenWriter {
    fn default() -> Self {
        Self::new()
    }
}
