use crate::records::row::CONTEXT_COLUMNS;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("Destination column '{0}' is mapped more than once")]
    DuplicateDestination(String),

    #[error("Source field '{0}' is mapped more than once")]
    DuplicateSource(String),

    #[error("Mapping entry for source field '{0}' has an empty destination")]
    EmptyDestination(String),

    #[error("Mapping contains an empty source field name")]
    EmptySource,
}

/// Ordered rename table from API field names to output column names.
///
/// Built once per run and never modified afterwards. Destination names are
/// unique; lookups are exact (no case folding).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new<I, S, T>(entries: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut seen_sources = HashSet::new();
        let mut seen_destinations = HashSet::new();
        let mut ordered = Vec::new();

        for (source, destination) in entries {
            let source = source.into();
            let destination = destination.into();

            if source.is_empty() {
                return Err(MappingError::EmptySource);
            }
            if destination.is_empty() {
                return Err(MappingError::EmptyDestination(source));
            }
            if !seen_sources.insert(source.clone()) {
                return Err(MappingError::DuplicateSource(source));
            }
            if !seen_destinations.insert(destination.clone()) {
                return Err(MappingError::DuplicateDestination(destination));
            }

            ordered.push((source, destination));
        }

        Ok(FieldMapping { entries: ordered })
    }

    /// Resolve source -> destination.
    pub fn resolve(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, d)| d.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, d)| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header of the output file: mapped destinations in table order,
    /// followed by the context columns. A destination that collides with a
    /// context column is listed once, in the context position.
    pub fn output_columns(&self) -> Vec<String> {
        self.destinations()
            .filter(|d| !CONTEXT_COLUMNS.contains(d))
            .chain(CONTEXT_COLUMNS)
            .map(str::to_string)
            .collect()
    }
}
