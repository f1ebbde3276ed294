//! Full recomputation pass
//!
//! Everything the UI renders for one rarity tier, recomputed from scratch
//! whenever any selection changes: filter, then options, then totals.

use crate::data::{Combination, Dataset};

use super::aggregate::{aggregated_results, aggregation_ready, AggregatedResult};
use super::filter::filter_combos;
use super::options::{
    levels_for_slot, options_per_position, rarity_label_for_position, search_options,
};
use super::selection::{Selection, SlotOption};

/// Query results for a single slot row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    /// Sub-rarities seen at this slot across the whole tier
    pub rarity_label: String,
    /// Every choice still reachable
    pub options: Vec<SlotOption>,
    /// `options` narrowed by the slot's own search box
    pub visible_options: Vec<SlotOption>,
    /// Levels of the chosen skill, empty unless a named skill is chosen
    pub levels: Vec<u32>,
}

/// Result of one recomputation pass
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    pub filtered: Vec<&'a Combination>,
    pub slots: Vec<SlotView>,
    /// Every used slot has a selection
    pub ready: bool,
    pub results: Vec<AggregatedResult>,
}

impl<'a> Evaluation<'a> {
    /// Run the whole pass. `slot_searches[i]` is slot `i`'s search box;
    /// missing entries mean no search.
    pub fn compute(
        dataset: &Dataset,
        combos: &'a [Combination],
        selection: &Selection,
        slot_searches: &[String],
    ) -> Self {
        let slot_count = selection.slot_count();
        let filtered = filter_combos(
            dataset,
            combos,
            &selection.skills,
            &selection.levels,
            &selection.search,
        );

        let slots = options_per_position(dataset, &filtered, slot_count)
            .into_iter()
            .enumerate()
            .map(|(index, options)| {
                let term = slot_searches.get(index).map(String::as_str).unwrap_or("");
                SlotView {
                    rarity_label: rarity_label_for_position(combos, index),
                    visible_options: search_options(&options, term),
                    options,
                    levels: levels_for_slot(dataset, &filtered, index, selection.skill(index)),
                }
            })
            .collect();

        let ready = aggregation_ready(&filtered, &selection.skills);
        let results = aggregated_results(dataset, &filtered, &selection.skills);

        log::debug!(
            "{} of {} combos match, {} results (ready: {})",
            filtered.len(),
            combos.len(),
            results.len(),
            ready
        );

        Self {
            filtered,
            slots,
            ready,
            results,
        }
    }

    /// Status line shown under the results
    pub fn status(&self) -> String {
        format!("{} combos match current filters", self.filtered.len())
    }
}
