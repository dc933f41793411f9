//! Immutable record store
//!
//! The store is built once at startup, validated, and then only read. It is
//! shared between requests as `Arc<RecordStore>`; there is no write path.

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::Person;
use std::collections::HashSet;
use std::path::Path;

/// Ordered, read-only collection of person records
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Person>,
}

impl RecordStore {
    /// Build a store, rejecting duplicate ids and negative ages
    pub fn new(records: Vec<Person>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for person in &records {
            if person.age < 0 {
                return Err(StoreError::InvalidAge {
                    id: person.id.clone(),
                    age: person.age,
                });
            }
            if !seen.insert(person.id.as_str()) {
                return Err(StoreError::DuplicateId(person.id.clone()));
            }
        }

        Ok(Self { records })
    }

    /// The built-in roster served when no record file is configured
    pub fn seed() -> Self {
        Self {
            records: seed_records(),
        }
    }

    /// Decode a JSON array of people
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let records: Vec<Person> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a JSON array of people from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} records from {:?}",
            store.len(),
            path.as_ref()
        );
        Ok(store)
    }

    /// All records in store order
    pub fn records(&self) -> &[Person] {
        &self.records
    }

    /// Linear scan for a record by id
    pub fn find_by_id(&self, id: &str) -> Option<&Person> {
        self.records.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn seed_records() -> Vec<Person> {
    vec![
        Person::new("1", 25).name("Juan").city("Ciudad A").gender("Masculino"),
        Person::new("2", 30).name("María").city("Ciudad B").gender("Femenino"),
        Person::new("6", 30).name("María").city("Ciudad B").gender("Femenino"),
        Person::new("3", 22).name("Carlos").city("Ciudad C").gender("Masculino"),
        Person::new("4", 28).name("Laura").city("Ciudad A").gender("Femenino"),
        Person::new("5", 35).name("Pedro").city("Ciudad B").gender("Masculino"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_seed_is_valid() {
        let seed = RecordStore::seed();
        assert_eq!(seed.len(), 6);
        assert!(RecordStore::new(seed.records().to_vec()).is_ok());

        let ids: Vec<&str> = seed.records().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "6", "3", "4", "5"]);
    }

    #[test]
    fn test_find_by_id() {
        let store = RecordStore::seed();
        assert_eq!(store.find_by_id("4").unwrap().name.as_deref(), Some("Laura"));
        assert!(store.find_by_id("99").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = RecordStore::new(vec![Person::new("1", 20), Person::new("1", 21)]);
        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_negative_age_rejected() {
        let result = RecordStore::new(vec![Person::new("1", -3)]);
        assert!(matches!(result, Err(StoreError::InvalidAge { age: -3, .. })));
    }

    #[test]
    fn test_from_json_str() {
        let store = RecordStore::from_json_str(
            r#"[
                {"id": "1", "nombre": "Ana", "edad": 41, "ciudad": "Lima"},
                {"id": "2", "edad": 19}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].city.as_deref(), Some("Lima"));
        assert_eq!(store.records()[1].city, None);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let result = RecordStore::from_json_str(r#"{"id": "1"}"#);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "a", "edad": 5, "genero": "Femenino"}}]"#).unwrap();

        let store = RecordStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.find_by_id("a").unwrap().gender.as_deref(), Some("Femenino"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = RecordStore::from_json_file("/nonexistent/people.json");
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
