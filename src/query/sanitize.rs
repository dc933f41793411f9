//! Null-argument sanitizer
//!
//! Rewrites raw query text before execution by cutting out every argument
//! clause whose supplied value is an explicit JSON `null`. This is text
//! surgery, not parsing:
//!
//! - the clause starts at the first occurrence of `<name>:` in the current text
//! - a paren-depth scan (`(` +1, `)` -1) finds where it ends
//! - removals run one name at a time, each against the already rewritten text
//!
//! # Clause boundaries
//!
//! ```text
//! name: f(a: 1) rest   depth returns to zero  -> cut through the matching `)`
//! name: 10, rest       `,` at depth zero      -> cut the `,` and trailing spaces
//! name: 10)            `)` at depth zero      -> cut up to, not including, `)`
//! name: 10             end of text            -> cut to the end
//! ```
//!
//! String literals, nested selections, brackets and repeated names are not
//! understood. `name:` also matches as a suffix of a longer argument name.

use serde_json::{Map, Value};

/// Remove the clause of every argument supplied with a null value
///
/// Entries are visited in the map's key order. Non-null entries are ignored.
pub fn sanitize_query(query: &str, supplied: &Map<String, Value>) -> String {
    let mut sanitized = query.to_string();

    for (name, value) in supplied {
        if value.is_null() {
            sanitized = remove_argument(&sanitized, name);
        }
    }

    sanitized
}

/// Remove the first `<name>:` clause from the query, if present
pub fn remove_argument(query: &str, name: &str) -> String {
    let pattern = format!("{}:", name);

    let Some(start) = query.find(&pattern) else {
        tracing::debug!(argument = %name, "Null argument not found in query");
        return query.to_string();
    };

    let end = clause_end(query.as_bytes(), start);

    tracing::debug!(
        argument = %name,
        removed = %&query[start..end],
        "Removed null argument from query"
    );

    let mut rewritten = String::with_capacity(query.len() - (end - start));
    rewritten.push_str(&query[..start]);
    rewritten.push_str(&query[end..]);
    rewritten
}

/// Byte offset one past the end of the clause starting at `start`
///
/// Only ASCII delimiters are inspected, so every returned offset is a char
/// boundary.
fn clause_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut pos = start;

    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' if depth == 0 => return pos,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return pos + 1;
                }
            }
            b',' if depth == 0 => {
                pos += 1;
                while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                return pos;
            }
            _ => {}
        }
        pos += 1;
    }

    bytes.len()
}
