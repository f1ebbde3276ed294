//! Error types for dataset loading

use thiserror::Error;

/// The input document could not be turned into a dataset at all.
///
/// Individual malformed rows never produce this error; they are skipped
/// by the loader and counted in its report.
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset must be a JSON object with \"rarity\" and \"skills_data\" keys, got {0}")]
    NotAnObject(&'static str),
}
