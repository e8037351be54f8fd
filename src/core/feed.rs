//! Per-record JSON decoding for feed and cache payloads
//!
//! A payload that is not valid JSON of the expected outer shape is an error.
//! Inside it, `null` metadata decodes to the field's default and a record
//! that still does not fit its model is dropped on its own.

use std::collections::BTreeMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Field deserializer that reads `null` as `T::default()`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode_record<T: DeserializeOwned>(kind: &str, key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Dropping {kind} {key}: {e}");
            None
        }
    }
}

/// Decode every value of a keyed collection, keeping the ones that fit
pub(crate) fn decode_map<T: DeserializeOwned>(
    kind: &str,
    raw: BTreeMap<String, Value>,
) -> BTreeMap<String, T> {
    raw.into_iter()
        .filter_map(|(key, value)| {
            let record = decode_record(kind, &key, value)?;
            Some((key, record))
        })
        .collect()
}

/// Decode every element of an array, keeping the ones that fit
pub(crate) fn decode_list<T: DeserializeOwned>(kind: &str, raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| decode_record(kind, &format!("#{index}"), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Record {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        count: u32,
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let record: Record = serde_json::from_str(r#"{"name": null, "count": null}"#).unwrap();
        assert_eq!(record, Record::default());

        let record: Record = serde_json::from_str(r#"{"count": 4}"#).unwrap();
        assert_eq!(record.count, 4);
    }

    #[test]
    fn test_bad_records_are_dropped_individually() {
        let raw: Vec<Value> =
            serde_json::from_str(r#"[{"name": "a"}, {"count": "many"}, 7, {"name": "b", "count": 2}]"#)
                .unwrap();
        let records: Vec<Record> = decode_list("record", raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "b");

        let raw: BTreeMap<String, Value> =
            serde_json::from_str(r#"{"x": {"name": "x"}, "y": "broken"}"#).unwrap();
        let records: BTreeMap<String, Record> = decode_map("record", raw);
        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["x"]);
    }
}
