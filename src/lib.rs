pub mod ast;
pub mod cli;
pub mod decode;
pub mod document;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod record;
pub mod threaded;
pub mod value;

pub use ast::{Token, TokenKind};
pub use document::{Document, DocumentError};
pub use lexer::{LexError, Lexer, TokenSource, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ErrorKind, ParseError, Parser, parse, parse_threaded};
pub use record::Record;
pub use threaded::ThreadedLexer;
pub use value::{Array, LookupError, NullElement, Value};
