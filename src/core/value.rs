//! Conversions between GraphQL literal values and JSON
//!
//! The executor and the schema parser both speak `serde_json::Value`
//! internally; this module owns the translation from `graphql-parser`
//! literals, including variable substitution for query arguments.

use graphql_parser::query::Value as GqlValue;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Convert a GraphQL value to JSON, resolving variables from the bindings map
///
/// Unbound variables become null rather than failing the request; the schema
/// decides downstream whether null is acceptable for the argument's use.
pub fn gql_value_to_json(value: &GqlValue<'_, String>, variables: &HashMap<String, Value>) -> Value {
    match value {
        GqlValue::Null => Value::Null,
        GqlValue::Int(i) => json!(i.as_i64().unwrap_or(0)),
        GqlValue::Float(f) => json!(f),
        GqlValue::String(s) => json!(s),
        GqlValue::Boolean(b) => json!(b),
        GqlValue::Enum(e) => json!(e),
        GqlValue::List(list) => Value::Array(
            list.iter()
                .map(|item| gql_value_to_json(item, variables))
                .collect(),
        ),
        GqlValue::Object(obj) => {
            let mut map = serde_json::Map::new();
            for (k, v) in obj {
                map.insert(k.clone(), gql_value_to_json(v, variables));
            }
            Value::Object(map)
        }
        GqlValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
    }
}

/// Convert a schema-position literal to JSON
///
/// Schema literals are const values; a variable here is a schema defect and
/// degrades to null.
pub fn literal_to_json(value: &GqlValue<'_, String>) -> Value {
    gql_value_to_json(value, &HashMap::new())
}

/// Coerce a field's argument list into a JSON argument map
pub fn coerce_arguments(
    arguments: &[(String, GqlValue<'_, String>)],
    variables: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    arguments
        .iter()
        .map(|(name, value)| (name.clone(), gql_value_to_json(value, variables)))
        .collect()
}

/// Convert camelCase to snake_case
pub fn camel_to_snake(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
