//! JSON dataset loader
//!
//! Turns the extracted charm document into a typed [`Dataset`]. The document
//! keys rarity tiers and sub-rarities by stringified integers; this is the
//! only place those string keys are seen. Malformed rows are skipped with a
//! warning instead of failing the whole load.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use super::dataset::{Combination, Dataset, RarityTier, SkillEntry, SlotInfoValue, SubRarity};
use crate::error::DataFormatError;

/// Counts gathered while loading, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tiers: usize,
    pub combinations: usize,
    pub sub_rarities: usize,
    pub skill_entries: usize,
    /// Rows dropped because they could not be interpreted
    pub skipped: usize,
}

/// Parse a dataset from JSON text
pub fn load_dataset(text: &str) -> Result<(Dataset, LoadReport), DataFormatError> {
    let value: Value = serde_json::from_str(text)?;
    dataset_from_value(&value)
}

/// Build a dataset from an already-parsed JSON document
pub fn dataset_from_value(value: &Value) -> Result<(Dataset, LoadReport), DataFormatError> {
    let root = value
        .as_object()
        .ok_or_else(|| DataFormatError::NotAnObject(json_kind(value)))?;

    let mut report = LoadReport::default();

    let rarity = match section(root, "rarity") {
        Some(map) => load_rarity(map, &mut report),
        None => BTreeMap::new(),
    };
    let skills = match section(root, "skills_data") {
        Some(map) => load_skills(map, &mut report),
        None => HashMap::new(),
    };

    report.skill_entries = skills.values().map(Vec::len).sum();
    let dataset = Dataset::new(rarity, skills);
    report.tiers = dataset.tiers().len();
    report.combinations = dataset.combination_count();
    report.sub_rarities = dataset.sub_rarity_count();

    log::info!(
        "Loaded {} rarity tiers ({} combinations) and {} sub-rarities ({} skill entries), \
         skipped {} rows",
        report.tiers,
        report.combinations,
        report.sub_rarities,
        report.skill_entries,
        report.skipped
    );

    Ok((dataset, report))
}

/// Look up a top-level section, tolerating its absence
fn section<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match root.get(key) {
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            log::warn!("Ignoring \"{}\": expected an object, got {}", key, json_kind(other));
            None
        }
        None => {
            log::warn!("Dataset has no \"{}\" section", key);
            None
        }
    }
}

fn load_rarity(
    map: &Map<String, Value>,
    report: &mut LoadReport,
) -> BTreeMap<RarityTier, Vec<Combination>> {
    let mut out: BTreeMap<RarityTier, Vec<Combination>> = BTreeMap::new();

    for (key, rows) in map {
        let Some(tier) = parse_key(key).map(RarityTier) else {
            log::warn!("Skipping rarity tier with malformed key {:?}", key);
            report.skipped += 1;
            continue;
        };
        let Some(rows) = rows.as_array() else {
            log::warn!("Skipping rarity tier {}: expected a list of combinations", tier);
            report.skipped += 1;
            continue;
        };

        let combos = out.entry(tier).or_default();
        for row in rows {
            match parse_combination(row) {
                Some(combo) => combos.push(combo),
                None => {
                    log::warn!("Skipping malformed combination in tier {}: {}", tier, row);
                    report.skipped += 1;
                }
            }
        }
    }

    out
}

fn load_skills(
    map: &Map<String, Value>,
    report: &mut LoadReport,
) -> HashMap<SubRarity, Vec<SkillEntry>> {
    let mut out: HashMap<SubRarity, Vec<SkillEntry>> = HashMap::new();

    for (key, rows) in map {
        let Some(sub) = parse_key(key).map(SubRarity) else {
            log::warn!("Skipping skill group with malformed rarity key {:?}", key);
            report.skipped += 1;
            continue;
        };
        let Some(rows) = rows.as_array() else {
            log::warn!("Skipping skill group {}: expected a list of skills", sub);
            report.skipped += 1;
            continue;
        };

        let entries = out.entry(sub).or_default();
        for row in rows {
            match parse_skill(row) {
                Some(entry) => entries.push(entry),
                None => {
                    log::warn!("Skipping invalid skill row for rarity {}: {}", sub, row);
                    report.skipped += 1;
                }
            }
        }
    }

    out
}

fn parse_key(key: &str) -> Option<u32> {
    key.trim().parse().ok()
}

fn parse_combination(row: &Value) -> Option<Combination> {
    let obj = row.as_object()?;
    let slots = obj
        .get("combination")?
        .as_array()?
        .iter()
        .map(|v| match v {
            Value::Null => Some(None),
            other => as_u32(other).map(|n| Some(SubRarity(n))),
        })
        .collect::<Option<Vec<_>>>()?;

    let slots_info = match obj.get("slots_info") {
        None | Some(Value::Null) => Vec::new(),
        Some(info) => serde_json::from_value::<Vec<Vec<SlotInfoValue>>>(info.clone())
            .unwrap_or_else(|e| {
                log::warn!("Dropping unreadable slots_info {}: {}", info, e);
                Vec::new()
            }),
    };

    Some(Combination { slots, slots_info })
}

fn parse_skill(row: &Value) -> Option<SkillEntry> {
    let obj = row.as_object()?;
    let name = obj.get("skill_name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let level = match obj.get("skill_level")? {
        Value::String(s) => s.trim().parse().ok()?,
        other => as_u32(other)?,
    };
    Some(SkillEntry::new(name, level))
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_well_formed() {
        let doc = json!({
            "rarity": {
                "3": [
                    {"combination": [4, null], "slots_info": [[1, "x"]]},
                    {"combination": [5, 6], "slots_info": []}
                ],
                "10": [{"combination": [7, null, null]}]
            },
            "skills_data": {
                "4": [{"skill_name": "Guard", "skill_level": 2}],
                "5": [{"skill_name": "Attack", "skill_level": 1}]
            }
        });

        let (dataset, report) = dataset_from_value(&doc).unwrap();
        assert_eq!(dataset.tiers(), vec![RarityTier(3), RarityTier(10)]);

        let combos = dataset.combos_for_rarity(RarityTier(3));
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].slots, vec![Some(SubRarity(4)), None]);
        assert_eq!(
            combos[0].slots_info,
            vec![vec![SlotInfoValue::Int(1), SlotInfoValue::Text("x".into())]]
        );
        assert!(combos[1].slots_info.is_empty());

        assert_eq!(
            dataset.skills_for(Some(SubRarity(4))),
            &[SkillEntry::new("Guard", 2)]
        );
        assert_eq!(report.skipped, 0);
        assert_eq!(report.combinations, 3);
        assert_eq!(report.combinations, dataset.combination_count());
        assert_eq!(report.sub_rarities, 2);
        assert_eq!(report.skill_entries, 2);
    }

    #[test]
    fn test_tiers_sorted_numerically() {
        let doc = json!({"rarity": {"10": [], "2": [], "1": []}, "skills_data": {}});
        let (dataset, _) = dataset_from_value(&doc).unwrap();
        assert_eq!(dataset.tiers(), vec![RarityTier(1), RarityTier(2), RarityTier(10)]);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let doc = json!({
            "rarity": {
                "RARE[3]": [{"combination": [1]}],
                "3": [
                    {"combination": [4, "-"]},
                    {"combination": [4, null]},
                    "not a row",
                    {"slots_info": []}
                ]
            },
            "skills_data": {
                "4": [
                    {"skill_name": "Guard", "skill_level": "x"},
                    {"skill_name": "Guard", "skill_level": -1},
                    {"skill_name": "", "skill_level": 1},
                    {"skill_name": "Guard", "skill_level": "3"},
                    {"skill_name": "Guard", "skill_level": 2}
                ],
                "abc": []
            }
        });

        let (dataset, report) = dataset_from_value(&doc).unwrap();
        assert_eq!(dataset.tiers(), vec![RarityTier(3)]);
        assert_eq!(dataset.combos_for_rarity(RarityTier(3)).len(), 1);
        assert_eq!(
            dataset.skills_for(Some(SubRarity(4))),
            &[SkillEntry::new("Guard", 3), SkillEntry::new("Guard", 2)]
        );
        // bad tier key, 3 bad combos, 3 bad skills, bad skill key
        assert_eq!(report.skipped, 8);
    }

    #[test]
    fn test_missing_sections_load_empty() {
        let (dataset, report) = dataset_from_value(&json!({})).unwrap();
        assert!(dataset.tiers().is_empty());
        assert_eq!(dataset.sub_rarity_count(), 0);
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = load_dataset("{\"rarity\": ").unwrap_err();
        assert!(matches!(err, DataFormatError::Json(_)));
    }

    #[test]
    fn test_non_object_document_fails() {
        let err = load_dataset("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DataFormatError::NotAnObject("an array")));
    }

    #[test]
    fn test_bad_slots_info_keeps_combination() {
        let doc = json!({
            "rarity": {"1": [{"combination": [2], "slots_info": [[1.5]]}]},
            "skills_data": {}
        });
        let (dataset, report) = dataset_from_value(&doc).unwrap();
        let combos = dataset.combos_for_rarity(RarityTier(1));
        assert_eq!(combos.len(), 1);
        assert!(combos[0].slots_info.is_empty());
        assert_eq!(report.skipped, 0);
    }
}
