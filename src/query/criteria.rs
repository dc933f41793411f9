//! Tri-state filter criteria
//!
//! Every criterion is decoded once from the raw argument map into one of:
//!
//! ```text
//! argument not mentioned      -> Absent    (no constraint)
//! argument: null              -> Null      (field must be unset)
//! argument: <value>           -> Value(v)  (equality or bound)
//! argument: <wrong type>      -> Absent    (lenient decode)
//! ```
//!
//! The lenient decode is intentional: a value of the wrong shape does not
//! constrain and is not reported.

use crate::query::args::{ArgValue, Arguments};
use crate::store::Person;

/// Argument name for the lower age bound
pub const ARG_MIN_AGE: &str = "edadMin";
/// Argument name for the upper age bound
pub const ARG_MAX_AGE: &str = "edadMax";
/// Argument name for the city match
pub const ARG_CITY: &str = "ciudad";
/// Argument name for the gender match
pub const ARG_GENDER: &str = "genero";

/// One optionally supplied constraint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Criterion<T> {
    /// Not mentioned by the caller
    #[default]
    Absent,
    /// Mentioned with an explicit null
    Null,
    /// Mentioned with a concrete value
    Value(T),
}

/// Conversion from a raw argument into a criterion's value type
pub trait FromArg: Sized {
    fn from_arg(value: &ArgValue) -> Option<Self>;
}

impl FromArg for i64 {
    fn from_arg(value: &ArgValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromArg for String {
    fn from_arg(value: &ArgValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<T: FromArg> Criterion<T> {
    /// Decode a possibly missing argument
    pub fn decode(value: Option<&ArgValue>) -> Self {
        match value {
            None => Criterion::Absent,
            Some(ArgValue::Null) => Criterion::Null,
            Some(raw) => match T::from_arg(raw) {
                Some(v) => Criterion::Value(v),
                None => {
                    tracing::debug!(?raw, "Ignoring criterion value of unexpected type");
                    Criterion::Absent
                }
            },
        }
    }
}

impl<T> Criterion<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Criterion::Absent)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Criterion::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl Criterion<String> {
    /// Exact match against an optional record field
    pub fn matches(&self, field: Option<&str>) -> bool {
        match self {
            Criterion::Absent => true,
            Criterion::Null => field.is_none(),
            Criterion::Value(expected) => field == Some(expected.as_str()),
        }
    }
}

/// The full criterion set understood by the filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub min_age: Criterion<i64>,
    pub max_age: Criterion<i64>,
    pub city: Criterion<String>,
    pub gender: Criterion<String>,
}

impl Criteria {
    /// No constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode all four criteria
    pub fn from_args(args: &Arguments) -> Self {
        Self {
            city: Criterion::decode(args.get(ARG_CITY)),
            gender: Criterion::decode(args.get(ARG_GENDER)),
            ..Self::age_bounds_from_args(args)
        }
    }

    /// Decode only the age bounds; other arguments are ignored
    pub fn age_bounds_from_args(args: &Arguments) -> Self {
        Self {
            min_age: Criterion::decode(args.get(ARG_MIN_AGE)),
            max_age: Criterion::decode(args.get(ARG_MAX_AGE)),
            ..Self::default()
        }
    }

    pub fn min_age(mut self, min: i64) -> Self {
        self.min_age = Criterion::Value(min);
        self
    }

    pub fn max_age(mut self, max: i64) -> Self {
        self.max_age = Criterion::Value(max);
        self
    }

    pub fn city(mut self, city: Criterion<String>) -> Self {
        self.city = city;
        self
    }

    pub fn gender(mut self, gender: Criterion<String>) -> Self {
        self.gender = gender;
        self
    }

    /// True when no criterion constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.min_age.value().is_none()
            && self.max_age.value().is_none()
            && self.city.is_absent()
            && self.gender.is_absent()
    }

    /// Check a record against every supplied criterion (AND)
    ///
    /// Age is a required field, so a null bound cannot select unset ages; it
    /// constrains nothing.
    pub fn matches(&self, person: &Person) -> bool {
        if let Some(min) = self.min_age.value() {
            if person.age < *min {
                return false;
            }
        }
        if let Some(max) = self.max_age.value() {
            if person.age > *max {
                return false;
            }
        }

        self.city.matches(person.city.as_deref()) && self.gender.matches(person.gender.as_deref())
    }
}
