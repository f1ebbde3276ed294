//! Skill table lookups
//!
//! Unknown or empty sub-rarities are not errors: they simply offer nothing.

use std::collections::BTreeSet;

use crate::data::{Dataset, SubRarity};

impl Dataset {
    /// Distinct skill names offered by a sub-rarity
    pub fn skill_names(&self, sub: Option<SubRarity>) -> BTreeSet<&str> {
        self.skills_for(sub).iter().map(|s| s.name.as_str()).collect()
    }

    /// Level of a skill in a sub-rarity, 0 if not offered. When the table
    /// lists the same skill more than once the highest level wins.
    pub fn skill_level(&self, sub: Option<SubRarity>, name: &str) -> u32 {
        self.skills_for(sub)
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.level)
            .max()
            .unwrap_or(0)
    }

    /// Every distinct level listed for a skill in a sub-rarity, ascending
    pub fn available_levels(&self, sub: Option<SubRarity>, name: &str) -> BTreeSet<u32> {
        self.skills_for(sub)
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.level)
            .collect()
    }

    pub fn offers_skill(&self, sub: Option<SubRarity>, name: &str) -> bool {
        self.skills_for(sub).iter().any(|s| s.name == name)
    }

    /// True if the sub-rarity lists this skill at exactly this level
    pub fn has_entry(&self, sub: Option<SubRarity>, name: &str, level: u32) -> bool {
        self.skills_for(sub)
            .iter()
            .any(|s| s.name == name && s.level == level)
    }

    /// True if any skill name of the sub-rarity contains the already
    /// lowercased search term
    pub(crate) fn offers_matching_skill(&self, sub: SubRarity, term_lower: &str) -> bool {
        self.skills_for(Some(sub))
            .iter()
            .any(|s| s.name.to_lowercase().contains(term_lower))
    }
}
