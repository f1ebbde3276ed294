//! Dataset definitions
//!
//! Rarity tiers, slot combinations and the per-sub-rarity skill tables.
//! A `Dataset` is built once by the loader and never mutated afterwards.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level charm rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RarityTier(pub u32);

/// Rarity assigned to a single slot; keys into the skill tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubRarity(pub u32);

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SubRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One value of the bracketed slot annotation carried alongside a combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotInfoValue {
    Int(i64),
    Text(String),
}

/// One legal assignment of sub-rarities across the slots of a charm
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Combination {
    /// `None` marks an unused slot
    #[serde(rename = "combination")]
    pub slots: Vec<Option<SubRarity>>,
    /// Annotation data, carried through untouched
    #[serde(rename = "slots_info", default)]
    pub slots_info: Vec<Vec<SlotInfoValue>>,
}

impl Combination {
    pub fn new(slots: Vec<Option<SubRarity>>) -> Self {
        Self {
            slots,
            slots_info: Vec::new(),
        }
    }

    /// Sub-rarity at a slot. Shorter combinations are implicitly padded with
    /// empty slots, so any index past the end reads as `None`.
    pub fn slot(&self, index: usize) -> Option<SubRarity> {
        self.slots.get(index).copied().flatten()
    }

    /// Number of slots stored for this combination
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the sub-rarities of every used slot
    pub fn used_slots(&self) -> impl Iterator<Item = SubRarity> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    /// Display form of the slot pattern, e.g. `[4, none, 6]`
    pub fn pattern(&self) -> String {
        let parts: Vec<String> = self
            .slots
            .iter()
            .map(|s| match s {
                Some(r) => r.to_string(),
                None => "none".to_string(),
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

/// A (skill name, skill level) pair offered by a sub-rarity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(rename = "skill_name")]
    pub name: String,
    #[serde(rename = "skill_level")]
    pub level: u32,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// The loaded charm tables
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Combinations for each rarity tier, in document order
    pub(crate) rarity: BTreeMap<RarityTier, Vec<Combination>>,
    /// Skill entries for each sub-rarity, in document order
    pub(crate) skills: HashMap<SubRarity, Vec<SkillEntry>>,
}

impl Dataset {
    pub fn new(
        rarity: BTreeMap<RarityTier, Vec<Combination>>,
        skills: HashMap<SubRarity, Vec<SkillEntry>>,
    ) -> Self {
        Self { rarity, skills }
    }

    /// All rarity tiers, ascending
    pub fn tiers(&self) -> Vec<RarityTier> {
        self.rarity.keys().copied().collect()
    }

    /// Combinations for a tier; empty if the tier is unknown
    pub fn combos_for_rarity(&self, tier: RarityTier) -> &[Combination] {
        self.rarity.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw skill entries for a sub-rarity; empty for `None` or unknown keys
    pub fn skills_for(&self, sub: Option<SubRarity>) -> &[SkillEntry] {
        sub.and_then(|s| self.skills.get(&s))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of combinations across every tier
    pub fn combination_count(&self) -> usize {
        self.rarity.values().map(Vec::len).sum()
    }

    /// Number of sub-rarities with a skill table
    pub fn sub_rarity_count(&self) -> usize {
        self.skills.len()
    }
}

/// Widest slot pattern among the given combinations
pub fn compute_max_slots<'a, I>(combos: I) -> usize
where
    I: IntoIterator<Item = &'a Combination>,
{
    combos.into_iter().map(Combination::len).max().unwrap_or(0)
}
