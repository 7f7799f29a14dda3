// file: src/parser/yaml.rs
// description: Conversion of yaml-rust documents into generic JSON value trees
// reference: https://docs.rs/yaml-rust

use serde_json::{Map, Number, Value};
use yaml_rust::Yaml;

/// Converts a YAML node, keeping scalar types intact.
///
/// Non-finite floats are kept as their source text so the schema reports
/// them as non-numbers instead of silently turning them into `null`.
pub fn to_json(node: &Yaml) -> Value {
    match node {
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::from(*i),
        Yaml::Real(raw) => match node.as_f64().and_then(Number::from_f64) {
            Some(n) => Value::Number(n),
            None => Value::String(raw.clone()),
        },
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        Yaml::Hash(hash) => {
            let mut map = Map::new();
            for (key, value) in hash {
                map.insert(key_to_string(key), to_json(value));
            }
            Value::Object(map)
        }
    }
}

fn key_to_string(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}
