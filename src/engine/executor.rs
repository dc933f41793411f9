//! Query Executor
//!
//! Executes a parsed document against a `FieldResolver`:
//!
//! ```text
//! query text → Document → resolve root fields → serialize → project → response
//! ```
//!
//! Problems with individual fields are collected as response errors and the
//! affected value becomes null; only an unparseable document produces
//! `data: null`.

use crate::engine::ast::Field;
use crate::engine::parser::parse_document;
use crate::resolver::FieldResolver;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

/// One step in the path to an erroring field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// An error reported alongside (partial) data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl FieldError {
    fn new(message: impl Into<String>, path: &[PathSegment]) -> Self {
        Self {
            message: message.into(),
            path: path.to_vec(),
        }
    }
}

/// Result of executing one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ExecutionResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Executes query documents against a set of root field resolvers
#[derive(Clone)]
pub struct QueryEngine {
    resolver: Arc<dyn FieldResolver>,
}

impl QueryEngine {
    pub fn new(resolver: Arc<dyn FieldResolver>) -> Self {
        Self { resolver }
    }

    /// Root fields served by this engine
    pub fn field_names(&self) -> &'static [&'static str] {
        self.resolver.field_names()
    }

    /// Parse and execute a query string
    pub fn execute(&self, query: &str) -> ExecutionResult {
        let start = Instant::now();

        let document = match parse_document(query) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected query document");
                return ExecutionResult {
                    data: Value::Null,
                    errors: vec![FieldError::new(e.to_string(), &[])],
                };
            }
        };

        let mut errors = Vec::new();
        let mut data = Map::new();

        for field in &document.selection {
            let key = field.response_key().to_string();
            let mut path = vec![PathSegment::Key(key.clone())];
            let value = self.execute_root_field(field, &mut path, &mut errors);
            data.insert(key, value);
        }

        tracing::debug!(
            operation = document.operation_name.as_deref().unwrap_or("<anonymous>"),
            fields = document.selection.len(),
            errors = errors.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Executed query"
        );

        ExecutionResult {
            data: Value::Object(data),
            errors,
        }
    }

    fn execute_root_field(
        &self,
        field: &Field,
        path: &mut Vec<PathSegment>,
        errors: &mut Vec<FieldError>,
    ) -> Value {
        let Some(resolved) = self.resolver.resolve(&field.name, &field.arguments) else {
            errors.push(FieldError::new(
                format!("Cannot query field \"{}\" on type \"Query\"", field.name),
                path,
            ));
            return Value::Null;
        };

        match serde_json::to_value(&resolved) {
            Ok(value) => project(value, &field.selection, path, errors),
            Err(e) => {
                errors.push(FieldError::new(e.to_string(), path));
                Value::Null
            }
        }
    }
}

/// Keep only the selected keys of a resolved value
///
/// Lists are projected element-wise; nulls and scalars pass through. A field
/// without a sub-selection returns its value whole.
fn project(
    value: Value,
    selection: &[Field],
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<FieldError>,
) -> Value {
    if selection.is_empty() {
        return value;
    }

    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    path.push(PathSegment::Index(i));
                    let projected = project(item, selection, path, errors);
                    path.pop();
                    projected
                })
                .collect(),
        ),
        Value::Object(mut object) => {
            let mut projected = Map::new();
            for field in selection {
                let key = field.response_key().to_string();
                path.push(PathSegment::Key(key.clone()));

                let value = match object.remove(&field.name) {
                    Some(inner) => project(inner, &field.selection, path, errors),
                    None => {
                        errors.push(FieldError::new(
                            format!("Cannot query field \"{}\"", field.name),
                            path,
                        ));
                        Value::Null
                    }
                };

                path.pop();
                projected.insert(key, value);
            }
            Value::Object(projected)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::PersonResolvers;
    use crate::store::RecordStore;
    use serde_json::json;

    fn engine() -> QueryEngine {
        let resolvers = PersonResolvers::new(Arc::new(RecordStore::seed()));
        QueryEngine::new(Arc::new(resolvers))
    }

    #[test]
    fn test_lookup_by_id() {
        let result = engine().execute(r#"{ persona(id: "2") { id nombre edad } }"#);

        assert!(!result.has_errors());
        assert_eq!(
            result.data,
            json!({"persona": {"id": "2", "nombre": "María", "edad": 30}})
        );
    }

    #[test]
    fn test_lookup_missing_is_null_without_error() {
        let result = engine().execute(r#"{ persona(id: "99") { id } }"#);
        assert!(!result.has_errors());
        assert_eq!(result.data, json!({"persona": null}));
    }

    #[test]
    fn test_age_range_list() {
        let result =
            engine().execute("{ personasEnRangoDeEdad(edadMin: 24, edadMax: 28) { id edad } }");
        assert_eq!(
            result.data,
            json!({"personasEnRangoDeEdad": [
                {"id": "1", "edad": 25},
                {"id": "4", "edad": 28}
            ]})
        );
    }

    #[test]
    fn test_city_ranges() {
        let result = engine().execute(
            "{ infoRangoEdadesPorCiudad { Ciudad RangoEdades { EdadMin EdadMax } } }",
        );
        assert_eq!(
            result.data,
            json!({"infoRangoEdadesPorCiudad": [
                {"Ciudad": "Ciudad A", "RangoEdades": {"EdadMin": 25, "EdadMax": 28}},
                {"Ciudad": "Ciudad B", "RangoEdades": {"EdadMin": 30, "EdadMax": 35}},
                {"Ciudad": "Ciudad C", "RangoEdades": {"EdadMin": 22, "EdadMax": 22}}
            ]})
        );
    }

    #[test]
    fn test_filtered_with_null_city() {
        let result = engine().execute("{ infoFiltrada(ciudad: null) { id } }");
        assert!(!result.has_errors());
        assert_eq!(result.data, json!({"infoFiltrada": []}));
    }

    #[test]
    fn test_aliases() {
        let result = engine().execute(
            r#"{ a: persona(id: "1") { n: nombre } b: persona(id: "5") { nombre } }"#,
        );
        assert_eq!(
            result.data,
            json!({"a": {"n": "Juan"}, "b": {"nombre": "Pedro"}})
        );
    }

    #[test]
    fn test_unknown_root_field() {
        let result = engine().execute("{ personas { id } }");
        assert_eq!(result.data, json!({"personas": null}));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, vec![PathSegment::Key("personas".to_string())]);
    }

    #[test]
    fn test_unknown_sub_field_in_list() {
        let result = engine().execute("{ personasEnRangoDeEdad(edadMin: 34) { id apellido } }");
        assert_eq!(
            result.data,
            json!({"personasEnRangoDeEdad": [{"id": "5", "apellido": null}]})
        );
        assert_eq!(
            result.errors[0].path,
            vec![
                PathSegment::Key("personasEnRangoDeEdad".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("apellido".to_string()),
            ]
        );
    }

    #[test]
    fn test_syntax_error_has_null_data() {
        let result = engine().execute("{ persona(id: ");
        assert_eq!(result.data, Value::Null);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].path.is_empty());
    }

    #[test]
    fn test_result_serialization_omits_empty_errors() {
        let result = engine().execute(r#"{ persona(id: "3") { nombre } }"#);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"data": {"persona": {"nombre": "Carlos"}}}));

        let failed = serde_json::to_value(engine().execute("{ x }")).unwrap();
        assert_eq!(failed["errors"][0]["path"], json!(["x"]));
    }
}
