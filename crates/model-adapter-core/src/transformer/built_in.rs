//! Built-in transformers for common conversions
//!
//! These are the transformers that declarative adapter files can name. Most
//! come in inverse pairs so a model built with one can be restored with the
//! other; [`inverse_of`] knows the pairing.
//!
//! Every built-in passes `null` through unchanged, so absent source fields
//! stay absent-looking instead of failing the whole adapt.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::Transformer;
use anyhow::{anyhow, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

const NAMES: &[&str] = &[
    "identity",
    "epoch_millis_to_iso8601",
    "iso8601_to_epoch_millis",
    "epoch_seconds_to_iso8601",
    "iso8601_to_epoch_seconds",
    "string_to_number",
    "number_to_string",
    "string_to_boolean",
    "boolean_to_string",
    "trim",
    "uppercase",
    "lowercase",
];

/// Names of every built-in transformer
pub fn names() -> &'static [&'static str] {
    NAMES
}

/// Look up a built-in transformer by name
pub fn lookup(name: &str) -> Option<Transformer> {
    let transformer = match name {
        "identity" => identity(),
        "epoch_millis_to_iso8601" => epoch_millis_to_iso8601(),
        "iso8601_to_epoch_millis" => iso8601_to_epoch_millis(),
        "epoch_seconds_to_iso8601" => epoch_seconds_to_iso8601(),
        "iso8601_to_epoch_seconds" => iso8601_to_epoch_seconds(),
        "string_to_number" => string_to_number(),
        "number_to_string" => number_to_string(),
        "string_to_boolean" => string_to_boolean(),
        "boolean_to_string" => boolean_to_string(),
        "trim" => trim(),
        "uppercase" => uppercase(),
        "lowercase" => lowercase(),
        _ => return None,
    };
    Some(transformer)
}

/// Name of the built-in that undoes `name`, if there is an exact one
pub fn inverse_of(name: &str) -> Option<&'static str> {
    match name {
        "identity" => Some("identity"),
        "epoch_millis_to_iso8601" => Some("iso8601_to_epoch_millis"),
        "iso8601_to_epoch_millis" => Some("epoch_millis_to_iso8601"),
        "epoch_seconds_to_iso8601" => Some("iso8601_to_epoch_seconds"),
        "iso8601_to_epoch_seconds" => Some("epoch_seconds_to_iso8601"),
        "string_to_number" => Some("number_to_string"),
        "number_to_string" => Some("string_to_number"),
        "string_to_boolean" => Some("boolean_to_string"),
        "boolean_to_string" => Some("string_to_boolean"),
        _ => None,
    }
}

/// Return the value unchanged
pub fn identity() -> Transformer {
    Transformer::new("identity", |value, _| Ok(value.clone()))
}

/// Epoch milliseconds to an ISO-8601 UTC string with millisecond precision
pub fn epoch_millis_to_iso8601() -> Transformer {
    Transformer::new("epoch_millis_to_iso8601", |value, _| {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let millis = integer(value).ok_or_else(|| anyhow!("expected epoch milliseconds, got {}", value))?;
        let time = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| anyhow!("timestamp out of range: {}", millis))?;
        Ok(Value::String(time.to_rfc3339_opts(SecondsFormat::Millis, true)))
    })
}

/// ISO-8601 / RFC 3339 string to epoch milliseconds
pub fn iso8601_to_epoch_millis() -> Transformer {
    Transformer::new("iso8601_to_epoch_millis", |value, _| {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = value.as_str().ok_or_else(|| anyhow!("expected a date string, got {}", value))?;
        let time = DateTime::parse_from_rfc3339(text)?;
        Ok(Value::from(time.timestamp_millis()))
    })
}

/// Epoch seconds to an ISO-8601 UTC string with second precision
pub fn epoch_seconds_to_iso8601() -> Transformer {
    Transformer::new("epoch_seconds_to_iso8601", |value, _| {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let seconds = integer(value).ok_or_else(|| anyhow!("expected epoch seconds, got {}", value))?;
        let time = DateTime::<Utc>::from_timestamp(seconds, 0)
            .ok_or_else(|| anyhow!("timestamp out of range: {}", seconds))?;
        Ok(Value::String(time.to_rfc3339_opts(SecondsFormat::Secs, true)))
    })
}

/// ISO-8601 / RFC 3339 string to epoch seconds
pub fn iso8601_to_epoch_seconds() -> Transformer {
    Transformer::new("iso8601_to_epoch_seconds", |value, _| {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = value.as_str().ok_or_else(|| anyhow!("expected a date string, got {}", value))?;
        let time = DateTime::parse_from_rfc3339(text)?;
        Ok(Value::from(time.timestamp()))
    })
}

/// Parse a numeric string; integers stay integers
pub fn string_to_number() -> Transformer {
    Transformer::new("string_to_number", |value, _| match value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
            let n: f64 = text
                .parse()
                .map_err(|_| anyhow!("cannot convert string to number: {:?}", text))?;
            Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| anyhow!("not a finite number: {:?}", text))
        }
        other => bail!("cannot convert {} to number", other),
    })
}

/// Render a number as a string
pub fn number_to_string() -> Transformer {
    Transformer::new("number_to_string", |value, _| match value {
        Value::Null | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        other => bail!("cannot convert {} to string", other),
    })
}

/// Parse `"true"`/`"false"` (and `"1"`/`"0"`, `"yes"`/`"no"`)
pub fn string_to_boolean() -> Transformer {
    Transformer::new("string_to_boolean", |value, _| match value {
        Value::Null | Value::Bool(_) => Ok(value.clone()),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => bail!("cannot convert string to boolean: {:?}", text),
        },
        other => bail!("cannot convert {} to boolean", other),
    })
}

/// Render a boolean as `"true"` or `"false"`
pub fn boolean_to_string() -> Transformer {
    Transformer::new("boolean_to_string", |value, _| match value {
        Value::Null | Value::String(_) => Ok(value.clone()),
        Value::Bool(flag) => Ok(Value::String(flag.to_string())),
        other => bail!("cannot convert {} to string", other),
    })
}

pub fn trim() -> Transformer {
    string_map("trim", |s: &str| s.trim().to_string())
}

pub fn uppercase() -> Transformer {
    string_map("uppercase", str::to_uppercase)
}

pub fn lowercase() -> Transformer {
    string_map("lowercase", str::to_lowercase)
}

fn string_map(name: &'static str, map: fn(&str) -> String) -> Transformer {
    Transformer::new(name, move |value, _| match value {
        Value::Null => Ok(Value::Null),
        Value::String(text) => Ok(Value::String(map(text))),
        other => bail!("{} expects a string, got {}", name, other),
    })
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(name: &str, value: Value) -> anyhow::Result<Value> {
        lookup(name).unwrap().apply(&value, &Value::Null)
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let iso = run("epoch_millis_to_iso8601", json!(1565001521464_i64)).unwrap();
        assert_eq!(iso, json!("2019-08-05T10:38:41.464Z"));
        assert_eq!(run("iso8601_to_epoch_millis", iso).unwrap(), json!(1565001521464_i64));
    }

    #[test]
    fn test_epoch_seconds_round_trip() {
        let iso = run("epoch_seconds_to_iso8601", json!(1565001521)).unwrap();
        assert_eq!(iso, json!("2019-08-05T10:38:41Z"));
        assert_eq!(run("iso8601_to_epoch_seconds", iso).unwrap(), json!(1565001521));
    }

    #[test]
    fn test_null_passes_through() {
        for name in names() {
            assert_eq!(run(name, Value::Null).unwrap(), Value::Null, "{}", name);
        }
    }

    #[test]
    fn test_string_number_conversions() {
        assert_eq!(run("string_to_number", json!("42")).unwrap(), json!(42));
        assert_eq!(run("string_to_number", json!("0.7")).unwrap(), json!(0.7));
        assert!(run("string_to_number", json!("abc")).is_err());
        assert_eq!(run("number_to_string", json!(42)).unwrap(), json!("42"));
    }

    #[test]
    fn test_boolean_conversions() {
        assert_eq!(run("string_to_boolean", json!("TRUE")).unwrap(), json!(true));
        assert_eq!(run("string_to_boolean", json!("0")).unwrap(), json!(false));
        assert!(run("string_to_boolean", json!("maybe")).is_err());
        assert_eq!(run("boolean_to_string", json!(false)).unwrap(), json!("false"));
    }

    #[test]
    fn test_string_maps() {
        assert_eq!(run("trim", json!("  x ")).unwrap(), json!("x"));
        assert_eq!(run("uppercase", json!("abc")).unwrap(), json!("ABC"));
        assert!(run("lowercase", json!(1)).is_err());
    }

    #[test]
    fn test_inverse_pairs_are_registered() {
        for name in names() {
            if let Some(inverse) = inverse_of(name) {
                assert!(lookup(inverse).is_some(), "missing inverse for {}", name);
                assert_eq!(inverse_of(inverse), Some(*name));
            }
        }
        assert!(lookup("unknown").is_none());
    }
}
