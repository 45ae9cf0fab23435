use std::fmt;

use crate::ast::{Token, TokenKind};

/// Errors raised when pulling tokens from a [`TokenSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A token was requested after `Eof` had already been delivered
    Exhausted,

    /// The token producer stopped before delivering `Eof`
    Interrupted,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Exhausted => write!(f, "No tokens left: end of input was already returned"),
            LexError::Interrupted => write!(f, "Token producer stopped before end of input"),
        }
    }
}

impl std::error::Error for LexError {}

/// Anything the parser can pull tokens from, one at a time and in input order.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// Pull based TME tokenizer.
///
/// Tokens are produced on demand. After the single `Eof` token every further
/// call to [`Lexer::next_token`] fails with [`LexError::Exhausted`].
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    start: usize,
    line: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            start: 0,
            line: 1,
            finished: false,
        }
    }

    /// Line the next token will be reported on
    pub fn line(&self) -> usize {
        self.line
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Space separators, line/paragraph separators and the ASCII controls
    /// `\t`..`\r`, `\x1C`..`\x1F`. NEL (U+0085) is not blank.
    fn is_blank(ch: char) -> bool {
        match ch {
            '\u{85}' => false,
            '\u{1C}'..='\u{1F}' => true,
            c => c.is_whitespace(),
        }
    }

    fn is_separator(ch: Option<char>) -> bool {
        match ch {
            None => true,
            Some(c) => matches!(c, '=' | ',' | '{' | '}') || Self::is_blank(c),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch != '\n' && Self::is_blank(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.start = self.position;
    }

    /// Builds a token from everything consumed since the last emit.
    fn emit(&mut self, kind: TokenKind) -> Token {
        let text: String = self.input[self.start..self.position].iter().collect();
        let token = Token::new(kind, self.line, text);

        // A newline belongs to the line it terminates.
        if kind == TokenKind::Newline {
            self.line += 1;
        }
        self.start = self.position;

        tracing::trace!(?kind, line = token.line, text = %token.text, "token");
        token
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.advance();
        self.emit(kind)
    }

    fn read_identifier(&mut self) -> Token {
        while !Self::is_separator(self.current_char()) {
            self.advance();
        }
        self.emit(TokenKind::Identifier)
    }

    fn read_number(&mut self) -> Token {
        let mut is_decimal = false;

        loop {
            match self.current_char() {
                Some(ch) if ch.is_ascii_digit() => self.advance(),
                Some('.')
                    if !is_decimal && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) =>
                {
                    is_decimal = true;
                    self.advance();
                }
                ch if Self::is_separator(ch) => {
                    let kind = if is_decimal {
                        TokenKind::Decimal
                    } else {
                        TokenKind::Number
                    };
                    return self.emit(kind);
                }
                // Not a number after all, rescan the whole run as identifier.
                _ => return self.read_identifier(),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.finished {
            return Err(LexError::Exhausted);
        }

        self.skip_whitespace();

        let token = match self.current_char() {
            None => {
                self.finished = true;
                tracing::trace!(line = self.line, "end of input");
                Token::new(TokenKind::Eof, self.line, "EOF")
            }
            Some('\n') => self.single(TokenKind::Newline),
            Some('=') => self.single(TokenKind::Assign),
            Some(',') => self.single(TokenKind::Comma),
            Some('{') => self.single(TokenKind::LBrace),
            Some('}') => self.single(TokenKind::RBrace),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(_) => self.read_identifier(),
        };

        Ok(token)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Lexer::next_token(self)
    }
}

/// Yields every token up to and including `Eof`, then stops.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token().ok()
    }
}

/// Tokenize a complete input, `Eof` included.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[test]
fn test_number_falls_back_to_identifier() {
    let mut lexer = Lexer::new("2. 2f 2.3.4");
    for text in ["2.", "2f", "2.3.4"] {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.text, text);
    }
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_newline_reports_terminated_line() {
    let mut lexer = Lexer::new("foo\nbar");
    assert_eq!(lexer.next_token().unwrap().line, 1);

    let newline = lexer.next_token().unwrap();
    assert_eq!(newline.kind, TokenKind::Newline);
    assert_eq!(newline.line, 1);

    assert_eq!(lexer.next_token().unwrap().line, 2);
    assert_eq!(lexer.line(), 2);
}
