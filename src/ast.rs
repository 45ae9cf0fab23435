//! # TME format - Lexical structure
//!
//! TME is the line oriented key/value format written by the jgradebook
//! export. A document is a sequence of named, numbered nodes:
//!
//! ```text
//! jgradebook.data.Course 1 {
//!  name=Programmieren+1
//!  cp=9
//!  finished=false
//!  groups={12, 13}
//!  comment=<null>
//! }
//! ```
//!
//! ## Grammar
//!
//! ```text
//! document    = { record, ("\n" | EOF) } ;
//! record      = IDENTIFIER, NUMBER, "{", "\n", { assignment }, "}" ;
//! assignment  = IDENTIFIER, "=", [ value ], "\n" ;
//! value       = NUMBER | DECIMAL | IDENTIFIER | array ;
//! array       = "{", [ value, { ("," | "="), value } ], "}" ;
//! ```
//!
//! ## Separators
//!
//! Identifiers and numbers run until the next separator: end of input, `=`,
//! `,`, `{`, `}` or any whitespace. Numbers are a subset of identifiers, so
//! `2f` or `2.` lex as identifiers.
//!
//! Identifier text is URL encoded. Decoding and the interpretation of `true`,
//! `false` and `<null>` happen in the parser, see [`crate::parser`].

pub mod tokens;

pub use tokens::{Token, TokenKind};
