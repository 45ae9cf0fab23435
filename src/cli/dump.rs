//! Render TME inputs as JSON

use regex::Regex;

use super::{CliError, Input, load};
use crate::output::records_to_json;

/// Options for the dump command
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    pub inputs: Vec<Input>,
    pub threaded: bool,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only records whose name matches this regex
    pub name: Option<String>,
    /// Only the record with this id
    pub id: Option<i32>,
}

pub fn execute_dump(options: &DumpOptions) -> Result<String, CliError> {
    let pattern = options.name.as_deref().map(Regex::new).transpose()?;
    let document = load(&options.inputs, options.threaded)?;

    let selected = document.records().iter().filter(|record| {
        pattern.as_ref().is_none_or(|re| re.is_match(record.name()))
            && options.id.is_none_or(|id| record.id() == id)
    });

    let json = records_to_json(selected);
    Ok(if options.pretty {
        format!("{:#}", json)
    } else {
        json.to_string()
    })
}
