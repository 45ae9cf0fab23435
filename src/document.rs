//! Id index over the records of one or more TME inputs.
//!
//! jgradebook exports reference other nodes by id (a course lists the ids of
//! its groups, a group the ids of its students), so ids have to be unique
//! across every file of an import.

use std::collections::HashMap;
use std::fmt;

use crate::{
    parser::{ParseError, parse, parse_threaded},
    record::Record,
    value::LookupError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Two records share an id
    DuplicateId(i32),

    /// Input number `index` (zero based) failed to parse
    Parse { index: usize, error: ParseError },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::DuplicateId(id) => write!(f, "Duplicated id {}", id),
            DocumentError::Parse { index, error } => write!(f, "Input {}: {}", index + 1, error),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Parse { error, .. } => Some(error),
            DocumentError::DuplicateId(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    records: Vec<Record>,
    index: HashMap<i32, usize>,
}

impl Document {
    pub fn from_records(records: Vec<Record>) -> Result<Self, DocumentError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id(), pos).is_some() {
                return Err(DocumentError::DuplicateId(record.id()));
            }
        }
        Ok(Document { records, index })
    }

    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        Self::parse_all([input])
    }

    /// Parse every input in order and index the concatenated records.
    pub fn parse_all<I, S>(inputs: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_all_with(inputs, parse)
    }

    /// Like [`Document::parse_all`], tokenizing each input on its own thread.
    pub fn parse_all_threaded<I, S>(inputs: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_all_with(inputs, parse_threaded)
    }

    fn parse_all_with<I, S>(
        inputs: I,
        parse_one: fn(&str) -> Result<Vec<Record>, ParseError>,
    ) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = vec![];
        for (index, input) in inputs.into_iter().enumerate() {
            let parsed =
                parse_one(input.as_ref()).map_err(|error| DocumentError::Parse { index, error })?;
            tracing::debug!(input = index, records = parsed.len(), "parsed input");
            records.extend(parsed);
        }
        Self::from_records(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&Record> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Record with this id, provided it also carries `name`.
    pub fn find(&self, name: &str, id: i32) -> Result<&Record, LookupError> {
        self.get(id)
            .filter(|record| record.name() == name)
            .ok_or_else(|| LookupError::MissingRecord {
                name: name.to_string(),
                id,
            })
    }

    /// Records whose [`Record::kind`] is `kind`, in source order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |record| record.kind() == kind)
    }
}
