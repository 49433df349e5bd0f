//! Type definitions for parsed CSV data

use indexmap::IndexMap;
use std::ops::Index;

/// One parsed data row, mapping header names to field values
///
/// Entries keep the order of the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` columns
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Get the value of a column by header name
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    /// Get a `(header, value)` pair by column position
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.fields
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert a value, returning the previous value for that header
    pub fn insert(&mut self, header: String, value: String) -> Option<String> {
        self.fields.insert(header, value)
    }

    /// Get number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Header names in column order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }

    /// `(header, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert record to vector of values
    pub fn to_strings(&self) -> Vec<String> {
        self.fields.values().cloned().collect()
    }

    /// Consume the record and return the underlying ordered map
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.fields
    }
}

impl Index<&str> for Record {
    type Output = str;

    fn index(&self, header: &str) -> &str {
        &self.fields[header]
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Record {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl From<IndexMap<String, String>> for Record {
    fn from(fields: IndexMap<String, String>) -> Self {
        Record { fields }
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
