//! User Interface module
//!
//! Terminal UI using ratatui. Holds all mutable selection state and calls
//! into the query engine on every change.

pub mod app;
pub mod widgets;

pub use app::App;
