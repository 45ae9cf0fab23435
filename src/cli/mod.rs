//! CLI support for tme-format
//!
//! The `tme` binary is a thin wrapper over these functions so they can be
//! driven directly from tests or other tools.

mod check;
mod dump;

pub use check::{CheckOptions, CheckReport, execute_check};
pub use dump::{DumpOptions, execute_dump};

use std::io;

use crate::{Document, DocumentError, ParseError};

/// A named TME text, typically the contents of one file.
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub text: String,
}

impl Input {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Input {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// An input failed to parse
    Parse { input: String, error: ParseError },
    /// Records could not be indexed together
    Document(DocumentError),
    /// Invalid `--name` pattern
    Pattern(regex::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse { input, error } => write!(f, "{}: {}", input, error),
            CliError::Document(e) => write!(f, "Import error: {}", e),
            CliError::Pattern(e) => write!(f, "Invalid name pattern: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Pass files or pipe TME data to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse { error, .. } => Some(error),
            CliError::Document(e) => Some(e),
            CliError::Pattern(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        CliError::Document(e)
    }
}

impl From<regex::Error> for CliError {
    fn from(e: regex::Error) -> Self {
        CliError::Pattern(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Parse every input and index the records of all of them together.
fn load(inputs: &[Input], threaded: bool) -> Result<Document, CliError> {
    if inputs.is_empty() {
        return Err(CliError::NoInput);
    }

    let texts = inputs.iter().map(|input| input.text.as_str());
    let document = if threaded {
        Document::parse_all_threaded(texts)
    } else {
        Document::parse_all(texts)
    };

    document.map_err(|e| match e {
        DocumentError::Parse { index, error } => CliError::Parse {
            input: inputs[index].name.clone(),
            error,
        },
        other => CliError::Document(other),
    })
}
