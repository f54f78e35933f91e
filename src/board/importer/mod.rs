mod cache;
mod normalizer;
mod parser;
mod sample;

pub use cache::DatasetCache;

use std::io::Read;
use std::path::Path;

use crate::board::suggestions::{SuggestionId, SuggestionRecord};

/// Imported board content: suggestions joined with their client profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDataset {
    pub suggestions: Vec<SuggestionRecord>,
}

impl BoardDataset {
    /// Built-in demo board used when no CSV export is configured.
    pub fn sample() -> Self {
        Self {
            suggestions: sample::sample_suggestions(),
        }
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn suggestion(&self, id: &SuggestionId) -> Option<&SuggestionRecord> {
        self.suggestions.iter().find(|record| &record.id == id)
    }
}

/// Error enumeration for board dataset import failures.
#[derive(Debug, thiserror::Error)]
pub enum BoardImportError {
    #[error("failed to open board export {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed board export: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the suggestion board from the CSV export the community site
/// produces.
pub struct BoardCsvImporter;

impl BoardCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BoardDataset, BoardImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| BoardImportError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BoardDataset, BoardImportError> {
        Ok(BoardDataset {
            suggestions: parser::parse_records(reader)?,
        })
    }
}
