//! Core data types for the Census record store
//!
//! - `Person`: a single immutable person record
//! - `CityAgeRange` and `AgeRange`: output of the per-city aggregation

use serde::{Deserialize, Serialize};

/// A single person record
///
/// Optional fields are structurally absent (`None`), which is distinct from an
/// empty string. Wire names follow the public query interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier
    pub id: String,
    /// Display name
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    /// Age in years
    #[serde(rename = "edad")]
    pub age: i64,
    /// City of residence
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    /// Gender
    #[serde(rename = "genero", default)]
    pub gender: Option<String>,
}

impl Person {
    /// Create a person with only the required fields set
    pub fn new(id: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            age,
            city: None,
            gender: None,
        }
    }

    /// Builder method: set name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method: set city
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Builder method: set gender
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}), {}",
            self.id,
            self.name.as_deref().unwrap_or("?"),
            self.age,
            self.city.as_deref().unwrap_or("-")
        )
    }
}

/// Inclusive numeric range over a group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeRange {
    #[serde(rename = "EdadMin")]
    pub min: i64,
    #[serde(rename = "EdadMax")]
    pub max: i64,
}

impl AgeRange {
    /// Range covering a single value
    pub fn single(age: i64) -> Self {
        Self { min: age, max: age }
    }

    /// Widen the range to include `age`
    pub fn include(&mut self, age: i64) {
        if age < self.min {
            self.min = age;
        }
        if age > self.max {
            self.max = age;
        }
    }
}

/// Age range of all people sharing a city
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityAgeRange {
    #[serde(rename = "Ciudad")]
    pub city: String,
    #[serde(rename = "RangoEdades")]
    pub range: AgeRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_wire_names() {
        let person = Person::new("1", 25).name("Juan").city("Ciudad A");
        let json = serde_json::to_value(&person).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["nombre"], "Juan");
        assert_eq!(json["edad"], 25);
        assert_eq!(json["ciudad"], "Ciudad A");
        assert!(json["genero"].is_null());
    }

    #[test]
    fn test_person_missing_optionals_deserialize() {
        let person: Person = serde_json::from_str(r#"{"id": "7", "edad": 40}"#).unwrap();
        assert_eq!(person, Person::new("7", 40));
    }

    #[test]
    fn test_age_range_include() {
        let mut range = AgeRange::single(30);
        range.include(22);
        range.include(35);
        range.include(28);
        assert_eq!(range, AgeRange { min: 22, max: 35 });
    }

    #[test]
    fn test_city_age_range_wire_names() {
        let entry = CityAgeRange {
            city: "Ciudad B".to_string(),
            range: AgeRange { min: 30, max: 35 },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Ciudad"], "Ciudad B");
        assert_eq!(json["RangoEdades"]["EdadMin"], 30);
        assert_eq!(json["RangoEdades"]["EdadMax"], 35);
    }
}
