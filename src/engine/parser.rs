//! Query document parser
//!
//! Parses the subset of query syntax the engine executes.
//!
//! # Supported Syntax
//!
//! ```text
//! [query [Name]] {
//!   [alias:] field [(arg: value, ...)] [{ sub-selection }]
//! }
//! ```
//!
//! Values: integers, floats, `"strings"`, `true`, `false`, `null`, bare enum
//! identifiers, `[lists]` and `{objects}`. Commas and `#` comments are
//! ignored. Empty argument lists `()` are accepted, since null-argument
//! sanitizing can leave them behind.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, take_while1},
    character::complete::{char, digit1, not_line_ending, one_of},
    combinator::{cut, map, opt, recognize, value, verify},
    multi::{many0, many0_count, many1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::engine::ast::{Document, Field};
use crate::engine::error::{EngineError, EngineResult};
use crate::query::{ArgValue, Arguments};

/// Parse a query document
pub fn parse_document(input: &str) -> EngineResult<Document> {
    let (rest, header) = preceded(ignored, opt(operation_header))(input).map_err(to_engine_error)?;

    let operation_name = match header {
        Some(("query", name)) => name.map(str::to_string),
        Some((kind @ ("mutation" | "subscription"), _)) => {
            return Err(EngineError::Unsupported(format!("{} operations", kind)));
        }
        Some((other, _)) => {
            return Err(EngineError::Parse(format!(
                "Unexpected input at '{}'",
                snippet(other)
            )));
        }
        None => None,
    };

    if rest.starts_with('(') {
        return Err(EngineError::Unsupported("variable definitions".to_string()));
    }

    let (rest, selection) = terminated(selection_set, ignored)(rest).map_err(to_engine_error)?;

    if !rest.is_empty() {
        return Err(EngineError::Parse(format!(
            "Unexpected input after document: '{}'",
            snippet(rest)
        )));
    }

    Ok(Document {
        operation_name,
        selection,
    })
}

fn to_engine_error(err: nom::Err<nom::error::Error<&str>>) -> EngineError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let at = e.input.trim_start();
            if at.starts_with('$') {
                EngineError::Unsupported("variables".to_string())
            } else if at.starts_with("...") {
                EngineError::Unsupported("fragments".to_string())
            } else if at.is_empty() {
                EngineError::Parse("Unexpected end of document".to_string())
            } else {
                EngineError::Parse(format!("Unexpected input at '{}'", snippet(at)))
            }
        }
        nom::Err::Incomplete(_) => EngineError::Parse("Unexpected end of document".to_string()),
    }
}

fn snippet(s: &str) -> String {
    s.chars().take(24).collect()
}

/// Whitespace, commas and comments
fn ignored(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0_count(alt((
            value((), take_while1(|c: char| c.is_whitespace() || c == ',')),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        |s: &str| !s.starts_with(|c: char| c.is_ascii_digit()),
    )(input)
}

/// `query Name` before the root selection set
fn operation_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(terminated(name, ignored), opt(terminated(name, ignored)))(input)
}

fn selection_set(input: &str) -> IResult<&str, Vec<Field>> {
    preceded(
        char('{'),
        cut(terminated(
            many1(preceded(ignored, field)),
            preceded(ignored, char('}')),
        )),
    )(input)
}

fn field(input: &str) -> IResult<&str, Field> {
    let (input, first) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, second) = opt(preceded(pair(char(':'), ignored), name))(input)?;
    let (input, _) = ignored(input)?;
    let (input, arguments) = opt(arguments)(input)?;
    let (input, _) = ignored(input)?;
    let (input, selection) = opt(selection_set)(input)?;

    let (alias, field_name) = match second {
        Some(actual) => (Some(first.to_string()), actual.to_string()),
        None => (None, first.to_string()),
    };

    Ok((
        input,
        Field {
            alias,
            name: field_name,
            arguments: arguments.unwrap_or_default(),
            selection: selection.unwrap_or_default(),
        },
    ))
}

fn arguments(input: &str) -> IResult<&str, Arguments> {
    map(
        preceded(
            char('('),
            cut(terminated(
                many0(preceded(ignored, argument)),
                preceded(ignored, char(')')),
            )),
        ),
        |pairs: Vec<(String, ArgValue)>| pairs.into_iter().collect(),
    )(input)
}

fn argument(input: &str) -> IResult<&str, (String, ArgValue)> {
    let (input, key) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = ignored(input)?;
    let (input, val) = cut(arg_value)(input)?;

    Ok((input, (key.to_string(), val)))
}

fn arg_value(input: &str) -> IResult<&str, ArgValue> {
    alt((
        map(string_literal, ArgValue::String),
        number,
        list,
        object,
        map(name, |word| match word {
            "null" => ArgValue::Null,
            "true" => ArgValue::Bool(true),
            "false" => ArgValue::Bool(false),
            other => ArgValue::Enum(other.to_string()),
        }),
    ))(input)
}

fn number(input: &str) -> IResult<&str, ArgValue> {
    let (rest, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;

    let parsed = if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>().ok().map(ArgValue::Float)
    } else {
        text.parse::<i64>().ok().map(ArgValue::Int)
    };

    match parsed {
        Some(v) => Ok((rest, v)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

fn string_literal(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((
                    value("\\", char('\\')),
                    value("\"", char('"')),
                    value("/", char('/')),
                    value("\n", char('n')),
                    value("\r", char('r')),
                    value("\t", char('t')),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

fn list(input: &str) -> IResult<&str, ArgValue> {
    map(
        delimited(
            char('['),
            many0(preceded(ignored, arg_value)),
            preceded(ignored, char(']')),
        ),
        ArgValue::List,
    )(input)
}

fn object(input: &str) -> IResult<&str, ArgValue> {
    map(
        delimited(
            char('{'),
            many0(preceded(ignored, argument)),
            preceded(ignored, char('}')),
        ),
        |pairs: Vec<(String, ArgValue)>| ArgValue::Object(pairs.into_iter().collect()),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_query() {
        let doc = parse_document("{ persona(id: \"1\") { id nombre } }").unwrap();

        assert_eq!(doc.operation_name, None);
        assert_eq!(doc.selection.len(), 1);

        let field = &doc.selection[0];
        assert_eq!(field.name, "persona");
        assert_eq!(field.arguments.get("id"), Some(&ArgValue::from("1")));
        let sub: Vec<&str> = field.selection.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(sub, vec!["id", "nombre"]);
    }

    #[test]
    fn test_named_operation() {
        let doc = parse_document("query Rangos { infoRangoEdadesPorCiudad { Ciudad } }").unwrap();
        assert_eq!(doc.operation_name.as_deref(), Some("Rangos"));
        assert_eq!(doc.selection[0].name, "infoRangoEdadesPorCiudad");
    }

    #[test]
    fn test_anonymous_query_keyword() {
        let doc = parse_document("query { persona(id: \"2\") { id } }").unwrap();
        assert_eq!(doc.operation_name, None);
    }

    #[test]
    fn test_argument_values() {
        let doc = parse_document(
            r#"{ f(a: 10, b: -2.5, c: "x\"y", d: null, e: true, g: RED, h: [1, 2], i: {k: "v"}, j: "") }"#,
        )
        .unwrap();
        let args = &doc.selection[0].arguments;

        assert_eq!(args["a"], ArgValue::Int(10));
        assert_eq!(args["b"], ArgValue::Float(-2.5));
        assert_eq!(args["c"], ArgValue::from("x\"y"));
        assert_eq!(args["d"], ArgValue::Null);
        assert_eq!(args["e"], ArgValue::Bool(true));
        assert_eq!(args["g"], ArgValue::Enum("RED".to_string()));
        assert_eq!(args["h"], ArgValue::List(vec![ArgValue::Int(1), ArgValue::Int(2)]));
        assert!(matches!(&args["i"], ArgValue::Object(obj) if obj["k"] == ArgValue::from("v")));
        assert_eq!(args["j"], ArgValue::from(""));
    }

    #[test]
    fn test_alias() {
        let doc = parse_document("{ juan: persona(id: \"1\") { nombre } }").unwrap();
        let field = &doc.selection[0];
        assert_eq!(field.alias.as_deref(), Some("juan"));
        assert_eq!(field.name, "persona");
        assert_eq!(field.response_key(), "juan");
    }

    #[test]
    fn test_empty_argument_list() {
        let doc = parse_document("{ infoFiltrada() { id } }").unwrap();
        assert!(doc.selection[0].arguments.is_empty());
    }

    #[test]
    fn test_sanitizer_leftovers_parse() {
        let doc = parse_document("{ infoFiltrada(edadMax: 20, ) { id } }").unwrap();
        assert_eq!(doc.selection[0].arguments.len(), 1);
    }

    #[test]
    fn test_comments_and_newlines() {
        let doc = parse_document(
            "# people\n{\n  persona(id: \"1\") {\n    id # the id\n    edad\n  }\n}\n",
        )
        .unwrap();
        assert_eq!(doc.selection[0].selection.len(), 2);
    }

    #[test]
    fn test_multiple_root_fields() {
        let doc = parse_document("{ a: persona(id: \"1\") { id } b: persona(id: \"2\") { id } }").unwrap();
        assert_eq!(doc.selection.len(), 2);
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(parse_document(""), Err(EngineError::Parse(_))));
        assert!(matches!(parse_document("{ persona(id: ) { id } }"), Err(EngineError::Parse(_))));
        assert!(matches!(parse_document("{ persona { id }"), Err(EngineError::Parse(_))));
        assert!(matches!(parse_document("{ persona } }"), Err(EngineError::Parse(_))));
        assert!(matches!(parse_document("{ }"), Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_unsupported_constructs() {
        assert_eq!(
            parse_document("{ persona(id: $id) { id } }"),
            Err(EngineError::Unsupported("variables".to_string()))
        );
        assert_eq!(
            parse_document("query Q($id: String) { persona(id: $id) { id } }"),
            Err(EngineError::Unsupported("variable definitions".to_string()))
        );
        assert_eq!(
            parse_document("mutation { borrar }"),
            Err(EngineError::Unsupported("mutation operations".to_string()))
        );
        assert_eq!(
            parse_document("{ persona(id: \"1\") { id ...campos } }"),
            Err(EngineError::Unsupported("fragments".to_string()))
        );
    }
}
