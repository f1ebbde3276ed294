//! Data loading and the charm dataset
//!
//! This module handles loading the extracted charm tables from JSON
//! into strongly-typed, read-only structures.

pub mod dataset;
pub mod loader;

pub use dataset::{
    compute_max_slots, Combination, Dataset, RarityTier, SkillEntry, SlotInfoValue, SubRarity,
};
pub use loader::{dataset_from_value, load_dataset, LoadReport};

/// Build a dataset from an inline `json!` document
#[cfg(test)]
pub(crate) fn fixture(doc: serde_json::Value) -> Dataset {
    dataset_from_value(&doc).expect("fixture must be a JSON object").0
}
