//! Predicate filter
//!
//! Stable filter over the record store: matching records are returned in
//! store order, never re-sorted. All supplied criteria must hold.

use crate::query::criteria::Criteria;
use crate::store::Person;

/// Return every record matching all supplied criteria, in input order
pub fn filter_records<'a>(records: &'a [Person], criteria: &Criteria) -> Vec<&'a Person> {
    if criteria.is_unconstrained() {
        return records.iter().collect();
    }

    let matched: Vec<&Person> = records.iter().filter(|p| criteria.matches(p)).collect();

    tracing::debug!(
        scanned = records.len(),
        matched = matched.len(),
        "Filtered records"
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::criteria::Criterion;
    use crate::store::RecordStore;

    fn sample() -> Vec<Person> {
        vec![
            Person::new("1", 25).city("A"),
            Person::new("2", 30).city("B"),
            Person::new("3", 22).city("A"),
        ]
    }

    fn ids(people: &[&Person]) -> Vec<String> {
        people.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let records = sample();
        let result = filter_records(&records, &Criteria::new());
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_age_window() {
        let records = sample();
        let result = filter_records(&records, &Criteria::new().min_age(24).max_age(28));
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_min_only() {
        let records = RecordStore::seed();
        let result = filter_records(records.records(), &Criteria::new().min_age(29));
        assert!(!result.is_empty());
        assert!(result.iter().all(|p| p.age >= 29));
        assert_eq!(ids(&result), vec!["2", "6", "5"]);
    }

    #[test]
    fn test_max_only() {
        let records = RecordStore::seed();
        let result = filter_records(records.records(), &Criteria::new().max_age(25));
        assert!(result.iter().all(|p| p.age <= 25));
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_preserves_store_order() {
        let records = RecordStore::seed();
        let result = filter_records(
            records.records(),
            &Criteria::new().city(Criterion::Value("Ciudad B".to_string())),
        );
        assert_eq!(ids(&result), vec!["2", "6", "5"]);
    }

    #[test]
    fn test_null_city_selects_unset_cities() {
        let records = vec![
            Person::new("1", 25).city("A"),
            Person::new("2", 30),
            Person::new("3", 22).city(""),
            Person::new("4", 40),
        ];
        let result = filter_records(&records, &Criteria::new().city(Criterion::Null));
        assert!(result.iter().all(|p| p.city.is_none()));
        assert_eq!(ids(&result), vec!["2", "4"]);
    }

    #[test]
    fn test_city_value_excludes_unset_cities() {
        let records = vec![Person::new("1", 25).city("A"), Person::new("2", 30)];
        let result = filter_records(
            &records,
            &Criteria::new().city(Criterion::Value("A".to_string())),
        );
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_combined_criteria_are_anded() {
        let records = RecordStore::seed();
        let criteria = Criteria::new()
            .min_age(26)
            .gender(Criterion::Value("Femenino".to_string()))
            .city(Criterion::Value("Ciudad A".to_string()));
        let result = filter_records(records.records(), &criteria);
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_null_gender_on_fully_populated_store() {
        let records = RecordStore::seed();
        let result = filter_records(records.records(), &Criteria::new().gender(Criterion::Null));
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let records = sample();
        let result = filter_records(&records, &Criteria::new().min_age(100));
        assert!(result.is_empty());
    }

    #[test]
    fn test_result_is_subset() {
        let records = RecordStore::seed();
        let criteria = Criteria::new().max_age(30);
        let result = filter_records(records.records(), &criteria);

        let mut cursor = records.records().iter();
        for person in result {
            assert!(cursor.any(|p| p == person), "{} out of order", person.id);
        }
    }
}
