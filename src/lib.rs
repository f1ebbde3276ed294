//! Charm Checker - find charm slot combinations for a set of skills
//!
//! Load the extracted charm tables once, then narrow a rarity tier's
//! combinations by per-slot skill and level choices and see the skill
//! totals each remaining combination grants.

pub mod charms;
pub mod config;
pub mod data;
pub mod error;
pub mod ui;

// Re-export commonly used types
pub use charms::{AggregatedResult, Evaluation, Selection, SlotChoice, SlotOption};
pub use data::{load_dataset, Combination, Dataset, RarityTier, SkillEntry, SubRarity};
pub use error::DataFormatError;
