//! Cache Key Module
//!
//! Deterministic key generation. A key is a category tag joined with its
//! parameters by `:`. Non-string parameters are canonicalized (object keys
//! sorted recursively) so that structurally identical values always produce
//! the identical key, no matter how or where they were constructed.

use serde_json::Value;

/// Delimiter between the category tag and each parameter.
const KEY_DELIMITER: char = ':';

// == Key Generation ==
/// Builds a cache key from a category tag and an ordered parameter list.
///
/// Strings join as-is; every other JSON value is rendered through
/// [`canonical_string`].
pub fn make_key(category: &str, params: &[Value]) -> String {
    let mut key = String::from(category);
    for param in params {
        key.push(KEY_DELIMITER);
        match param {
            Value::String(s) => key.push_str(s),
            other => key.push_str(&canonical_string(other)),
        }
    }
    key
}

/// Key for instrument search results: `search:<lowercased query>`.
pub fn search_key(query: &str) -> String {
    make_key("search", &[Value::String(query.to_lowercase())])
}

/// Key for quote/timeseries data: `stock:<id>:<range>:<interval>`.
pub fn stock_key(instrument_id: &str, range: &str, interval: &str) -> String {
    make_key(
        "stock",
        &[
            Value::String(instrument_id.to_string()),
            Value::String(range.to_string()),
            Value::String(interval.to_string()),
        ],
    )
}

/// Key for fundamentals records: `fundamentals:<instrument id>`.
pub fn fundamentals_key(instrument_id: &str) -> String {
    make_key("fundamentals", &[Value::String(instrument_id.to_string())])
}

// == Canonical Serialization ==
/// Renders a JSON value deterministically: object keys are sorted
/// recursively before serialization, arrays keep their order.
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| {
                    format!(
                        "{}:{}",
                        serde_json::to_string(k).expect("string serialization"),
                        canonical_string(&map[k])
                    )
                })
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(canonical_string).collect();
            format!("[{}]", rendered.join(","))
        }
        // Scalars already have a single serialization
        other => other.to_string(),
    }
}
