//! Selectable choices per slot
//!
//! Derived from the combinations that survive the current filters, so the
//! UI only ever offers choices that still lead somewhere.

use std::collections::{BTreeSet, HashSet};

use crate::data::{Combination, Dataset, SubRarity};

use super::selection::{SlotChoice, SlotOption};

/// For each slot, the skill names reachable across the filtered
/// combinations, sorted case-insensitively. `SlotOption::Empty` comes first
/// when some combination leaves the slot unused.
pub fn options_per_position(
    dataset: &Dataset,
    filtered: &[&Combination],
    slot_count: usize,
) -> Vec<Vec<SlotOption>> {
    (0..slot_count)
        .map(|index| {
            let mut names: HashSet<&str> = HashSet::new();
            let mut has_empty = false;

            for combo in filtered {
                match combo.slot(index) {
                    None => has_empty = true,
                    sub => names.extend(dataset.skill_names(sub)),
                }
            }

            let mut sorted: Vec<&str> = names.into_iter().collect();
            sorted.sort_by(|a, b| {
                a.to_lowercase()
                    .cmp(&b.to_lowercase())
                    .then_with(|| a.cmp(b))
            });

            let mut options = Vec::with_capacity(sorted.len() + 1);
            if has_empty {
                options.push(SlotOption::Empty);
            }
            options.extend(sorted.into_iter().map(|n| SlotOption::Named(n.to_string())));
            options
        })
        .collect()
}

/// Narrow one slot's options by its own search box
pub fn search_options(options: &[SlotOption], term: &str) -> Vec<SlotOption> {
    options.iter().filter(|o| o.matches(term)).cloned().collect()
}

/// Levels of the chosen skill available in a slot across the filtered
/// combinations, ascending. Empty unless a named skill is chosen.
pub fn levels_for_slot(
    dataset: &Dataset,
    filtered: &[&Combination],
    slot_index: usize,
    choice: &SlotChoice,
) -> Vec<u32> {
    let Some(name) = choice.skill_name().filter(|n| !n.is_empty()) else {
        return Vec::new();
    };

    let mut levels = BTreeSet::new();
    for combo in filtered {
        let sub = combo.slot(slot_index);
        if sub.is_some() {
            levels.extend(dataset.available_levels(sub, name));
        }
    }
    levels.into_iter().collect()
}

/// Which sub-rarities appear at a slot across a tier, e.g. `"4 | 5 | none"`.
/// Sub-rarities ascend numerically and `none` comes last.
pub fn rarity_label_for_position(combos: &[Combination], index: usize) -> String {
    if combos.is_empty() {
        return "—".to_string();
    }

    let subs: BTreeSet<Option<SubRarity>> = combos.iter().map(|c| c.slot(index)).collect();
    let mut parts: Vec<String> = subs.iter().flatten().map(|s| s.to_string()).collect();
    if subs.contains(&None) {
        parts.push("none".to_string());
    }
    parts.join(" | ")
}
