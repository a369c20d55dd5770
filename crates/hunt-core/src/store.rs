use crate::error::{HuntError, Result};
use crate::types::{HuntEntry, HuntMap, UserId};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// HuntStore
// ---------------------------------------------------------------------------

/// Durable snapshot of the whole registry.
pub trait HuntStore {
    /// Read the snapshot. A missing snapshot is an empty map, not an error.
    fn load(&self) -> Result<HuntMap>;

    /// Overwrite the snapshot with `hunts`.
    fn save(&self, hunts: &HuntMap) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Single JSON document mapping user ids to arrays of hunt records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HuntStore for JsonFileStore {
    fn load(&self) -> Result<HuntMap> {
        match crate::io::read_if_exists(&self.path)? {
            Some(data) => parse_document(&data),
            None => Ok(HuntMap::new()),
        }
    }

    fn save(&self, hunts: &HuntMap) -> Result<()> {
        let data = serde_json::to_string_pretty(hunts)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Document parsing (canonical records + legacy tuples)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    /// `[name, "category"]`, `[name, ["a", "b"]]` or `[name, [...], "completed"]`.
    Legacy(Vec<Value>),
    Record(HuntEntry),
}

const COMPLETED_MARKER: &str = "completed";

/// Parse a stored document, accepting both canonical records and the older
/// tuple layouts. Repeated names within one list are folded into one entry.
pub fn parse_document(data: &str) -> Result<HuntMap> {
    let raw: BTreeMap<String, Vec<StoredEntry>> = serde_json::from_str(data)?;
    let mut hunts = HuntMap::new();
    for (key, stored) in raw {
        let user = match UserId::parse(&key) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(key, error = %e, "skipping hunt list with unusable user id");
                continue;
            }
        };
        let mut entries = Vec::with_capacity(stored.len());
        for item in stored {
            entries.push(match item {
                StoredEntry::Record(entry) => HuntEntry {
                    completed: entry.completed,
                    ..HuntEntry::new(entry.name, entry.categories)
                },
                StoredEntry::Legacy(values) => legacy_entry(&values)?,
            });
        }
        hunts.insert(user, fold_duplicates(entries));
    }
    Ok(hunts)
}

fn legacy_entry(values: &[Value]) -> Result<HuntEntry> {
    let name = match values.first() {
        Some(Value::String(s)) => s.clone(),
        _ => {
            return Err(HuntError::CorruptStore(format!(
                "legacy entry without a name: {}",
                Value::Array(values.to_vec())
            )))
        }
    };

    let categories = match values.get(1) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(HuntError::CorruptStore(format!(
                    "category for '{name}' is not a string: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(HuntError::CorruptStore(format!(
                "categories for '{name}' have an unexpected shape: {other}"
            )))
        }
    };

    let completed = match values.get(2) {
        Some(Value::String(s)) => s.eq_ignore_ascii_case(COMPLETED_MARKER),
        Some(Value::Bool(b)) => *b,
        _ => false,
    };

    let mut entry = HuntEntry::new(name, categories);
    entry.completed = completed;
    Ok(entry)
}

/// Merge entries sharing a name into the first occurrence. The older format
/// stored one tuple per category, so a two-type entry appeared twice.
fn fold_duplicates(entries: Vec<HuntEntry>) -> Vec<HuntEntry> {
    let mut folded: Vec<HuntEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match folded.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                existing.merge_categories(&entry.categories);
                existing.completed |= entry.completed;
            }
            None => folded.push(entry),
        }
    }
    folded
}

// ---------------------------------------------------------------------------
// In-memory store for tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn uid(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("hunts.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_directory_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data/hunts.json"));

        let mut hunts = HuntMap::new();
        let mut done = HuntEntry::new("Eevee", vec!["normal".into()]);
        done.completed = true;
        hunts.insert(
            uid("1"),
            vec![HuntEntry::new("Charizard", vec!["fire".into(), "flying".into()]), done],
        );
        hunts.insert(uid("2"), vec![]);

        store.save(&hunts).unwrap();
        assert_eq!(store.load().unwrap(), hunts);
    }

    #[test]
    fn saved_document_uses_tagged_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hunts.json");
        let store = JsonFileStore::new(&path);
        let mut hunts = HuntMap::new();
        hunts.insert(uid("7"), vec![HuntEntry::new("Pikachu", vec!["electric".into()])]);
        store.save(&hunts).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap())
            .unwrap();
        assert_eq!(raw["7"][0]["name"], "Pikachu");
        assert_eq!(raw["7"][0]["categories"][0], "electric");
        assert_eq!(raw["7"][0]["completed"], false);
    }

    #[test]
    fn reload_of_saved_load_is_stable() {
        let doc = r#"{"10": [["Gengar", ["ghost", "poison"], "completed"]], "11": []}"#;
        let first = parse_document(doc).unwrap();

        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("hunts.json"));
        store.save(&first).unwrap();
        assert_eq!(store.load().unwrap(), first);
    }

    #[test]
    fn single_category_tuples_fold_by_name() {
        let doc = r#"{"5": [["Charizard", "fire"], ["Charizard", "flying"], ["Pikachu", "electric"]]}"#;
        let hunts = parse_document(doc).unwrap();
        let list = &hunts[&uid("5")];
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Charizard");
        assert_eq!(list[0].categories, vec!["fire".to_string(), "flying".to_string()]);
        assert_eq!(list[1].name, "Pikachu");
        assert!(list.iter().all(|e| !e.completed));
    }

    #[test]
    fn list_tuples_with_completed_marker() {
        let doc = r#"{"5": [["Gyarados", ["water", "flying"]], ["Eevee", ["normal"], "completed"]]}"#;
        let hunts = parse_document(doc).unwrap();
        let list = &hunts[&uid("5")];
        assert!(!list[0].completed);
        assert_eq!(list[0].categories.len(), 2);
        assert!(list[1].completed);
    }

    #[test]
    fn mixed_records_and_tuples_in_one_list() {
        let doc = r#"{"5": [
            {"name": "Mew", "categories": ["psychic"], "completed": true},
            ["Mew", "psychic"],
            ["Ditto", "normal"]
        ]}"#;
        let hunts = parse_document(doc).unwrap();
        let list = &hunts[&uid("5")];
        assert_eq!(list.len(), 2);
        assert!(list[0].completed);
        assert_eq!(list[0].categories, vec!["psychic".to_string()]);
    }

    #[test]
    fn record_with_repeated_categories_is_deduplicated() {
        let doc = r#"{"6": [
            {"name": "Charizard", "categories": ["fire", "flying", "fire", "flying"], "completed": true}
        ]}"#;
        let hunts = parse_document(doc).unwrap();
        let entry = &hunts[&uid("6")][0];
        assert_eq!(entry.categories, vec!["fire".to_string(), "flying".to_string()]);
        assert!(entry.completed);
    }

    #[test]
    fn unusable_user_keys_are_skipped() {
        let doc = r#"{"not-a-user": [["Mew", "psychic"]], "9": []}"#;
        let hunts = parse_document(doc).unwrap();
        assert_eq!(hunts.len(), 1);
        assert!(hunts.contains_key(&uid("9")));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_document("{ not json").is_err());
        assert!(parse_document(r#"{"1": [[42, "fire"]]}"#).is_err());
        assert!(parse_document(r#"{"1": [["Mew", 3]]}"#).is_err());
    }

    #[test]
    fn corrupt_file_load_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hunts.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(JsonFileStore::new(&path).load().is_err());
    }
}
