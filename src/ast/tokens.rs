use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Emitted exactly once, as the last token.
    Eof,

    /// A `\n` character
    Newline,

    /// Any run of non-separator characters that is not a number.
    ///
    /// Identifiers may contain almost anything, including URL escapes:
    /// ```text
    /// jgradebook.data.Course
    /// %C3%9Cbungsblatt
    /// <null>
    /// ```
    Identifier,

    /// Natural number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Number,

    /// Decimal number, digits on both sides of the dot
    ///
    /// # Examples
    /// ```text
    /// 23.42
    /// 0.5
    /// ```
    Decimal,

    /// `=`
    Assign,

    /// `,`
    Comma,

    /// `{`
    LBrace,

    /// `}`
    RBrace,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Newline => "newline",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Decimal => "decimal",
            TokenKind::Assign => "'='",
            TokenKind::Comma => "','",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
        };
        f.write_str(s)
    }
}

/// A single token: its kind, the line it appeared on and the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, text: impl Into<String>) -> Self {
        Token {
            kind,
            line,
            text: text.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
