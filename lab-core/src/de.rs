//! Lenient field deserializers for backend records.
//!
//! The backend is not strict about scalar types: prices arrive as numbers or
//! numeric strings, ids as strings or integers, ranges as objects or
//! `"min - max"` text. These helpers accept every shape seen and map anything
//! else to `None` instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::sample::NumericRange;

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim() {
            "true" | "activo" => Some(true),
            "false" | "inactivo" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

pub(crate) fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Parse `"6.5 - 8.5"` style text. A leading minus belongs to the first bound.
fn parse_range_text(text: &str) -> Option<NumericRange> {
    let text = text.trim();
    let (lo, hi) = text
        .split_once(" - ")
        .or_else(|| text.split_once('–'))
        .or_else(|| {
            let offset = usize::from(text.starts_with('-'));
            text[offset..]
                .find('-')
                .map(|i| (&text[..offset + i], &text[offset + i + 1..]))
        })?;
    let min = lo.trim().replace(',', ".").parse().ok();
    let max = hi.trim().replace(',', ".").parse().ok();
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(NumericRange { min, max })
}

pub(crate) fn lenient_range<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<NumericRange>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Object(map)) => {
            let min = map.get("min").and_then(value_as_f64);
            let max = map.get("max").and_then(value_as_f64);
            if min.is_none() && max.is_none() {
                None
            } else {
                Some(NumericRange { min, max })
            }
        }
        Some(Value::String(s)) => parse_range_text(&s),
        _ => None,
    })
}
