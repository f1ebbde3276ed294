//! Skill totals per surviving combination

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::data::{compute_max_slots, Combination, Dataset, SubRarity};

use super::selection::SlotChoice;

/// Summed skill levels for one combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedResult {
    /// The combination's full slot pattern
    pub combo: Vec<Option<SubRarity>>,
    /// Skill name -> total level across the slots it was chosen in
    pub totals: BTreeMap<String, u32>,
}

impl AggregatedResult {
    /// Slot pattern for display, e.g. `[4, none]`
    pub fn pattern(&self) -> String {
        Combination::new(self.combo.clone()).pattern()
    }
}

impl fmt::Display for AggregatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Pattern: {}", self.pattern())?;
        if self.totals.is_empty() {
            return writeln!(f, "  (no skills)");
        }
        for (name, level) in &self.totals {
            writeln!(f, "  {}: level {}", name, level)?;
        }
        Ok(())
    }
}

/// Totals can be computed once every slot that some filtered combination
/// uses has a selection. Always-empty slots need none.
pub fn aggregation_ready(filtered: &[&Combination], skills: &[SlotChoice]) -> bool {
    let width = compute_max_slots(filtered.iter().copied());
    (0..width).all(|index| {
        let used = filtered.iter().any(|c| c.slot(index).is_some());
        !used || skills.get(index).is_some_and(SlotChoice::is_set)
    })
}

/// Per-combination skill totals, in filtered order. Empty until
/// [`aggregation_ready`] holds.
pub fn aggregated_results(
    dataset: &Dataset,
    filtered: &[&Combination],
    skills: &[SlotChoice],
) -> Vec<AggregatedResult> {
    if filtered.is_empty() || !aggregation_ready(filtered, skills) {
        return Vec::new();
    }

    filtered
        .iter()
        .map(|combo| {
            let mut totals: BTreeMap<String, u32> = BTreeMap::new();
            for (index, choice) in skills.iter().enumerate() {
                let Some(name) = choice.skill_name() else {
                    continue;
                };
                let level = dataset.skill_level(combo.slot(index), name);
                let total = totals.entry(name.to_string()).or_insert(0);
                *total = total.saturating_add(level);
            }
            AggregatedResult {
                combo: combo.slots.clone(),
                totals,
            }
        })
        .collect()
}
