//! Charm query engine
//!
//! Stateless queries over a loaded [`Dataset`](crate::data::Dataset): which
//! combinations survive the user's constraints, which choices remain per
//! slot, and the skill totals of each survivor.

pub mod aggregate;
pub mod evaluate;
pub mod filter;
pub mod lookup;
pub mod options;
pub mod selection;

pub use aggregate::{aggregated_results, aggregation_ready, AggregatedResult};
pub use evaluate::{Evaluation, SlotView};
pub use filter::{filter_combos, normalize_search, passes_search, passes_slot, passes_slots};
pub use options::{levels_for_slot, options_per_position, rarity_label_for_position, search_options};
pub use selection::{Selection, SlotChoice, SlotOption, EMPTY_LABEL};
