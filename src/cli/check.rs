//! Validate TME inputs

use super::{CliError, Input, load};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub inputs: Vec<Input>,
    /// Tokenize on a background thread
    pub threaded: bool,
}

/// Summary of a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub inputs: usize,
    pub records: usize,
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} records in {} input(s), all valid", self.records, self.inputs)
    }
}

/// Parse all inputs and make sure their ids are unique.
pub fn execute_check(options: &CheckOptions) -> Result<CheckReport, CliError> {
    let document = load(&options.inputs, options.threaded)?;

    Ok(CheckReport {
        inputs: options.inputs.len(),
        records: document.len(),
    })
}
