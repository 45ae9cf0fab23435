use std::fmt;

use crate::{
    ast::{Token, TokenKind},
    decode::decode_or_raw,
    lexer::{LexError, Lexer, TokenSource},
    record::Record,
    threaded::ThreadedLexer,
    value::{Array, Value},
};

/// Identifier text standing for "no value".
pub const NULL_MARKER: &str = "<null>";

/// What went wrong at a grammar position.
///
/// The `Display` strings are the messages jgradebook users already know and
/// are matched on by callers, keep them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ExpectedNewlineOrEof,
    MissingNodeName,
    MissingNodeId,
    ExpectedOpeningBrace,
    ExpectedNewline,
    UnexpectedEof,
    ExpectedKeyName,
    MissingAssign,
    UnexpectedValue,
    MissingValueAfterSeparator,
    ExpectedSeparator,
    /// Number does not fit a 32-bit signed integer
    InvalidLiteral,
    NullArrayElement,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::ExpectedNewlineOrEof => "Expected newline or EOF",
            ErrorKind::MissingNodeName => "Missing node name",
            ErrorKind::MissingNodeId => "Missing node ID",
            ErrorKind::ExpectedOpeningBrace => "Expected opening curly brackets",
            ErrorKind::ExpectedNewline => "Expected newline character",
            ErrorKind::UnexpectedEof => "Unexpected EOF",
            ErrorKind::ExpectedKeyName => "Expected key name",
            ErrorKind::MissingAssign => "Missing assign character",
            ErrorKind::UnexpectedValue => "Unexpected key value",
            ErrorKind::MissingValueAfterSeparator => "Missing value after seperator",
            ErrorKind::ExpectedSeparator => "Expected ',', '=' or '}'",
            ErrorKind::InvalidLiteral => "Invalid numeric literal",
            ErrorKind::NullArrayElement => "Null value in array",
        };
        f.write_str(msg)
    }
}

/// Errors that abort a parse. There is never a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Token did not match the grammar
    Syntax { kind: ErrorKind, line: usize },

    /// Token source failed
    Lex(LexError),
}

impl ParseError {
    fn syntax(kind: ErrorKind, line: usize) -> Self {
        ParseError::Syntax { kind, line }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ParseError::Syntax { kind, .. } => Some(*kind),
            ParseError::Lex(_) => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line, .. } => Some(*line),
            ParseError::Lex(_) => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { kind, line } => {
                write!(f, "Syntax error '{}' in line {}", kind, line)
            }
            ParseError::Lex(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Syntax { .. } => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Recursive descent parser with one token of lookahead.
pub struct Parser<S: TokenSource = Lexer> {
    source: S,
    peeked: Option<Token>,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Parser {
            source,
            peeked: None,
        }
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => Ok(self.source.next_token()?),
        }
    }

    fn peek(&mut self) -> Result<&Token, ParseError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.source.next_token()?,
        };
        let token: &Token = self.peeked.insert(token);
        Ok(token)
    }

    fn peek_kind(&mut self) -> Result<(TokenKind, usize), ParseError> {
        let token = self.peek()?;
        Ok((token.kind, token.line))
    }

    fn expect(&mut self, kind: TokenKind, err: ErrorKind) -> Result<Token, ParseError> {
        let token = self.next()?;
        if token.is(kind) {
            Ok(token)
        } else {
            Err(ParseError::syntax(err, token.line))
        }
    }

    /// Parse the whole input into its records, in source order.
    ///
    /// ```text
    /// document = { record, ("\n" | EOF) } ;
    /// ```
    pub fn parse(mut self) -> Result<Vec<Record>, ParseError> {
        let mut records = vec![];

        while self.peek_kind()?.0 != TokenKind::Eof {
            records.push(self.parse_record()?);

            match self.peek_kind()? {
                (TokenKind::Newline, _) => {
                    self.next()?;
                }
                (TokenKind::Eof, _) => {}
                (_, line) => return Err(ParseError::syntax(ErrorKind::ExpectedNewlineOrEof, line)),
            }
        }

        tracing::debug!(records = records.len(), "parsed document");
        Ok(records)
    }

    /// ```text
    /// record = IDENTIFIER, NUMBER, "{", "\n", { assignment }, "}" ;
    /// ```
    fn parse_record(&mut self) -> Result<Record, ParseError> {
        let name = self.expect(TokenKind::Identifier, ErrorKind::MissingNodeName)?;
        let id = self.expect(TokenKind::Number, ErrorKind::MissingNodeId)?;
        let id = parse_integer(&id)?;

        self.expect(TokenKind::LBrace, ErrorKind::ExpectedOpeningBrace)?;
        self.expect(TokenKind::Newline, ErrorKind::ExpectedNewline)?;

        let mut record = Record::new(name.text, id);

        loop {
            match self.peek_kind()? {
                (TokenKind::RBrace, _) => break,
                (TokenKind::Eof, line) => {
                    return Err(ParseError::syntax(ErrorKind::UnexpectedEof, line));
                }
                _ => self.parse_assignment(&mut record)?,
            }
        }

        // Closing brace
        self.next()?;

        tracing::debug!(name = record.name(), id = record.id(), keys = record.len(), "parsed node");
        Ok(record)
    }

    /// An empty value or `<null>` leaves the key unset.
    ///
    /// ```text
    /// assignment = IDENTIFIER, "=", [ value ], "\n" ;
    /// ```
    fn parse_assignment(&mut self, record: &mut Record) -> Result<(), ParseError> {
        let key = self.expect(TokenKind::Identifier, ErrorKind::ExpectedKeyName)?;
        self.expect(TokenKind::Assign, ErrorKind::MissingAssign)?;

        let token = self.next()?;
        if token.is(TokenKind::Newline) {
            return Ok(());
        }

        let value = self.parse_value(token)?;
        self.expect(TokenKind::Newline, ErrorKind::ExpectedNewline)?;

        if value.is_null() {
            tracing::trace!(key = %key.text, "skipping null value");
        } else {
            record.insert(key.text, value);
        }
        Ok(())
    }

    /// Interpret an already consumed value token.
    ///
    /// ```text
    /// value = NUMBER | DECIMAL | IDENTIFIER | array ;
    /// ```
    fn parse_value(&mut self, token: Token) -> Result<Value, ParseError> {
        match token.kind {
            TokenKind::Number => Ok(Value::Integer(parse_integer(&token)?)),
            TokenKind::Decimal => token
                .text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::syntax(ErrorKind::InvalidLiteral, token.line)),
            TokenKind::Identifier => {
                let text = decode_or_raw(&token.text);
                Ok(if text == "true" {
                    Value::Boolean(true)
                } else if text == "false" {
                    Value::Boolean(false)
                } else if text == NULL_MARKER {
                    Value::Null
                } else {
                    Value::String(text)
                })
            }
            TokenKind::LBrace => self.parse_array().map(Value::Array),
            _ => Err(ParseError::syntax(ErrorKind::UnexpectedValue, token.line)),
        }
    }

    /// Opening brace is already consumed; consumes through the closing one.
    ///
    /// ```text
    /// array = "{", [ value, { ("," | "="), value } ], "}" ;
    /// ```
    fn parse_array(&mut self) -> Result<Array, ParseError> {
        let mut array = Array::new();
        let mut token = self.next()?;

        while !token.is(TokenKind::RBrace) {
            let line = token.line;
            let value = self.parse_value(token)?;

            token = self.next()?;
            match token.kind {
                TokenKind::Comma | TokenKind::Assign => {
                    let (kind, next_line) = self.peek_kind()?;
                    if kind == TokenKind::RBrace {
                        return Err(ParseError::syntax(
                            ErrorKind::MissingValueAfterSeparator,
                            next_line,
                        ));
                    }
                }
                TokenKind::RBrace => {}
                _ => return Err(ParseError::syntax(ErrorKind::ExpectedSeparator, token.line)),
            }

            array
                .push(value)
                .map_err(|_| ParseError::syntax(ErrorKind::NullArrayElement, line))?;

            if !token.is(TokenKind::RBrace) {
                token = self.next()?;
            }
        }

        Ok(array)
    }
}

fn parse_integer(token: &Token) -> Result<i32, ParseError> {
    token
        .text
        .parse::<i32>()
        .map_err(|_| ParseError::syntax(ErrorKind::InvalidLiteral, token.line))
}

/// Parse a complete TME document.
pub fn parse(input: &str) -> Result<Vec<Record>, ParseError> {
    Parser::new(Lexer::new(input)).parse()
}

/// Like [`parse`], with tokenizing running on a separate thread.
pub fn parse_threaded(input: &str) -> Result<Vec<Record>, ParseError> {
    Parser::new(ThreadedLexer::spawn(input)).parse()
}
