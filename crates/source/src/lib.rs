//! Record sources.
//!
//! A run consumes its records up front (de-duplication and chunking need the
//! whole list), so sources are drained with [`DataSource::collect_records`].
//!
//! - [`VecDataSource`]: an in-memory list of records
//! - [`IteratorDataSource`]: wraps any iterator of records
//! - [`parse_records`]: decodes a JSON array of flat objects

use labelgrid_types::Record;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),
}

/// A trait for sources that feed records into a run.
pub trait DataSource: Send {
    /// Returns `None` when the source is exhausted.
    fn next(&mut self) -> Option<Record>;

    /// Hint about the total number of records, if known.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Drains the source.
    fn collect_records(&mut self) -> Vec<Record> {
        let mut records = Vec::with_capacity(self.size_hint().unwrap_or(0));
        while let Some(record) = self.next() {
            records.push(record);
        }
        records
    }
}

/// Wraps any iterator as a DataSource.
pub struct IteratorDataSource<I>
where
    I: Iterator<Item = Record> + Send,
{
    inner: I,
    size_hint: Option<usize>,
}

impl<I> IteratorDataSource<I>
where
    I: Iterator<Item = Record> + Send,
{
    pub fn new(inner: I) -> Self {
        let (lower, upper) = inner.size_hint();
        let size_hint = (upper == Some(lower)).then_some(lower);
        Self { inner, size_hint }
    }
}

impl<I> DataSource for IteratorDataSource<I>
where
    I: Iterator<Item = Record> + Send,
{
    fn next(&mut self) -> Option<Record> {
        self.inner.next()
    }

    fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }
}

/// A data source backed by an in-memory list.
pub struct VecDataSource {
    records: std::vec::IntoIter<Record>,
    len: usize,
}

impl VecDataSource {
    pub fn new(records: Vec<Record>) -> Self {
        let len = records.len();
        Self {
            records: records.into_iter(),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl DataSource for VecDataSource {
    fn next(&mut self) -> Option<Record> {
        self.records.next()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

impl DataSource for Box<dyn DataSource> {
    fn next(&mut self) -> Option<Record> {
        (**self).next()
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

/// Decodes a JSON array of flat objects. Array items that are not objects
/// are skipped with a warning.
pub fn parse_records(json: &str) -> Result<VecDataSource, SourceError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(SourceError::NotAnArray(json_type_name(&value)));
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        if item.is_object() {
            records.push(Record::from_value(item));
        } else {
            log::warn!(
                "Skipping record #{}: expected an object, found {}",
                position + 1,
                json_type_name(&item)
            );
        }
    }
    Ok(VecDataSource::new(records))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
