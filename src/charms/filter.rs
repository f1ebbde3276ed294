//! Combination filtering
//!
//! Pure predicates over a single combination plus the stable filter that
//! applies them to a rarity tier's combination list.

use crate::data::{Combination, Dataset};

use super::selection::SlotChoice;

/// Combinations that satisfy the global search and every slot constraint,
/// in their original order.
pub fn filter_combos<'a>(
    dataset: &Dataset,
    combos: &'a [Combination],
    skills: &[SlotChoice],
    levels: &[Option<u32>],
    search: &str,
) -> Vec<&'a Combination> {
    let term = normalize_search(search);

    combos
        .iter()
        .filter(|combo| {
            term.as_deref()
                .map_or(true, |t| passes_search(dataset, combo, t))
                && passes_slots(dataset, combo, skills, levels)
        })
        .collect()
}

/// Trimmed, lowercased search term; `None` when there is nothing to search
pub fn normalize_search(search: &str) -> Option<String> {
    let term = search.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Some used slot offers a skill whose name contains the (lowercased) term.
/// A combination with no used slot never matches.
pub fn passes_search(dataset: &Dataset, combo: &Combination, term_lower: &str) -> bool {
    combo
        .used_slots()
        .any(|sub| dataset.offers_matching_skill(sub, term_lower))
}

/// Every slot selection is satisfied. Slots past the end of `skills` are
/// unconstrained; a level without a named skill is ignored.
pub fn passes_slots(
    dataset: &Dataset,
    combo: &Combination,
    skills: &[SlotChoice],
    levels: &[Option<u32>],
) -> bool {
    skills.iter().enumerate().all(|(index, choice)| {
        let level = levels.get(index).copied().flatten();
        passes_slot(dataset, combo, index, choice, level)
    })
}

/// Check a single slot selection against a combination
pub fn passes_slot(
    dataset: &Dataset,
    combo: &Combination,
    index: usize,
    choice: &SlotChoice,
    level: Option<u32>,
) -> bool {
    let sub = combo.slot(index);
    match choice {
        SlotChoice::Unset => true,
        SlotChoice::Empty => sub.is_none(),
        SlotChoice::Named(name) => {
            if sub.is_none() || !dataset.offers_skill(sub, name) {
                return false;
            }
            match level {
                Some(level) => dataset.has_entry(sub, name, level),
                None => true,
            }
        }
    }
}
