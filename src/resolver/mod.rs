//! Resolver Adapter
//!
//! Binds the public query fields to the query core:
//!
//! | Field                      | Arguments                          | Result           |
//! |----------------------------|------------------------------------|------------------|
//! | `persona`                  | `id`                               | person or null   |
//! | `personasEnRangoDeEdad`    | `edadMin`, `edadMax`               | list of people   |
//! | `infoFiltrada`             | `edadMin`, `edadMax`, `ciudad`, `genero` | list of people |
//! | `infoRangoEdadesPorCiudad` | none                               | list of ranges   |
//!
//! Resolvers never fail. A missing record is a null result and an empty
//! filter is an empty list.

use crate::query::{age_range_by_city, filter_records, Arguments, Criteria};
use crate::store::{CityAgeRange, Person, RecordStore};
use serde::Serialize;
use std::sync::Arc;

/// Lookup by id
pub const FIELD_PERSON: &str = "persona";
/// Age window over the numeric bounds only
pub const FIELD_AGE_RANGE: &str = "personasEnRangoDeEdad";
/// Full criterion set
pub const FIELD_FILTERED: &str = "infoFiltrada";
/// Per-city age ranges
pub const FIELD_CITY_AGE_RANGES: &str = "infoRangoEdadesPorCiudad";

/// Value produced by a resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Null,
    Person(Person),
    People(Vec<Person>),
    AgeRanges(Vec<CityAgeRange>),
}

impl Resolved {
    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }
}

/// Source of root field values for the execution engine
pub trait FieldResolver: Send + Sync {
    /// Resolve a root field, or `None` when the field is unknown
    fn resolve(&self, field: &str, args: &Arguments) -> Option<Resolved>;

    /// Names of the root fields this resolver serves
    fn field_names(&self) -> &'static [&'static str];
}

/// Resolvers over an immutable record store
#[derive(Debug, Clone)]
pub struct PersonResolvers {
    store: Arc<RecordStore>,
}

impl PersonResolvers {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// `persona(id)`: a non-string or missing id resolves to null
    pub fn person_by_id(&self, args: &Arguments) -> Resolved {
        args.get("id")
            .and_then(|v| v.as_str())
            .and_then(|id| self.store.find_by_id(id))
            .map(|p| Resolved::Person(p.clone()))
            .unwrap_or(Resolved::Null)
    }

    /// `personasEnRangoDeEdad(edadMin, edadMax)`
    pub fn people_in_age_range(&self, args: &Arguments) -> Resolved {
        self.filtered(&Criteria::age_bounds_from_args(args))
    }

    /// `infoFiltrada(edadMin, edadMax, ciudad, genero)`
    pub fn filtered_people(&self, args: &Arguments) -> Resolved {
        self.filtered(&Criteria::from_args(args))
    }

    /// `infoRangoEdadesPorCiudad`
    pub fn city_age_ranges(&self) -> Resolved {
        Resolved::AgeRanges(age_range_by_city(self.store.records()))
    }

    fn filtered(&self, criteria: &Criteria) -> Resolved {
        let people = filter_records(self.store.records(), criteria)
            .into_iter()
            .cloned()
            .collect();
        Resolved::People(people)
    }
}

impl FieldResolver for PersonResolvers {
    fn resolve(&self, field: &str, args: &Arguments) -> Option<Resolved> {
        let resolved = match field {
            FIELD_PERSON => self.person_by_id(args),
            FIELD_AGE_RANGE => self.people_in_age_range(args),
            FIELD_FILTERED => self.filtered_people(args),
            FIELD_CITY_AGE_RANGES => self.city_age_ranges(),
            _ => return None,
        };
        Some(resolved)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            FIELD_PERSON,
            FIELD_AGE_RANGE,
            FIELD_FILTERED,
            FIELD_CITY_AGE_RANGES,
        ]
    }
}
