//! Per-slot selection state
//!
//! The UI owns a [`Selection`] and mutates it on user input; the query
//! functions only ever read it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown for the "slot must be empty" choice
pub const EMPTY_LABEL: &str = "— none —";

/// What the user picked for one slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotChoice {
    /// No constraint on this slot
    #[default]
    Unset,
    /// The slot must be unused
    Empty,
    /// The slot must offer this skill
    Named(String),
}

impl SlotChoice {
    /// Choice for a skill name; a blank name means no constraint
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            SlotChoice::Unset
        } else {
            SlotChoice::Named(name)
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, SlotChoice::Unset)
    }

    /// Skill name, if a real skill is chosen
    pub fn skill_name(&self) -> Option<&str> {
        match self {
            SlotChoice::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl From<SlotOption> for SlotChoice {
    fn from(option: SlotOption) -> Self {
        match option {
            SlotOption::Empty => SlotChoice::Empty,
            SlotOption::Named(name) => SlotChoice::named(name),
        }
    }
}

/// An entry in a slot's list of selectable choices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotOption {
    /// Some surviving combination leaves this slot unused
    Empty,
    Named(String),
}

impl SlotOption {
    /// Case-insensitive search match. The empty option matches terms that
    /// are a prefix or substring of the word "none".
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        match self {
            SlotOption::Empty => "none".starts_with(&term) || "none".contains(&term),
            SlotOption::Named(name) => name.to_lowercase().contains(&term),
        }
    }
}

impl fmt::Display for SlotOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotOption::Empty => f.write_str(EMPTY_LABEL),
            SlotOption::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for SlotChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotChoice::Unset => Ok(()),
            SlotChoice::Empty => f.write_str(EMPTY_LABEL),
            SlotChoice::Named(name) => f.write_str(name),
        }
    }
}

/// Everything the user has constrained for the active rarity tier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub skills: Vec<SlotChoice>,
    /// Only meaningful where `skills` holds a named skill
    pub levels: Vec<Option<u32>>,
    pub search: String,
}

impl Selection {
    /// Fresh state with `slot_count` unconstrained slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            skills: vec![SlotChoice::Unset; slot_count],
            levels: vec![None; slot_count],
            search: String::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.skills.len()
    }

    /// Pick a skill for a slot. Choosing for one slot invalidates the
    /// slot's level and everything chosen in later slots.
    pub fn choose_skill(&mut self, index: usize, choice: SlotChoice) {
        if index >= self.skills.len() {
            return;
        }
        self.skills[index] = choice;
        for later in self.skills.iter_mut().skip(index + 1) {
            *later = SlotChoice::Unset;
        }
        for level in self.levels.iter_mut().skip(index) {
            *level = None;
        }
    }

    pub fn choose_level(&mut self, index: usize, level: Option<u32>) {
        if let Some(slot) = self.levels.get_mut(index) {
            *slot = level;
        }
    }

    pub fn skill(&self, index: usize) -> &SlotChoice {
        static UNSET: SlotChoice = SlotChoice::Unset;
        self.skills.get(index).unwrap_or(&UNSET)
    }

    pub fn level(&self, index: usize) -> Option<u32> {
        self.levels.get(index).copied().flatten()
    }

    /// Clear every constraint, keeping the slot count
    pub fn reset(&mut self) {
        *self = Self::new(self.slot_count());
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.skills.iter().all(|s| !s.is_set())
    }
}
