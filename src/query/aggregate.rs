//! Range aggregation
//!
//! Groups records by city and folds each group's ages into a `{min, max}`
//! range in a single streaming pass. Groups are emitted in ordinal key order,
//! regardless of the order records are stored in.

use crate::store::{AgeRange, CityAgeRange, Person};
use std::collections::BTreeMap;

/// Per-city age ranges, sorted by city
///
/// Records without a city belong to no group.
pub fn age_range_by_city(records: &[Person]) -> Vec<CityAgeRange> {
    let mut groups: BTreeMap<&str, AgeRange> = BTreeMap::new();

    for person in records {
        let Some(city) = person.city.as_deref() else {
            continue;
        };

        groups
            .entry(city)
            .and_modify(|range| range.include(person.age))
            .or_insert_with(|| AgeRange::single(person.age));
    }

    groups
        .into_iter()
        .map(|(city, range)| CityAgeRange {
            city: city.to_string(),
            range,
        })
        .collect()
}
