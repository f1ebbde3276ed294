//! UI widgets

pub mod slot_row;

pub use slot_row::{SlotField, SlotRowWidget};
