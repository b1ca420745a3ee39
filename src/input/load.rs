use crate::input::AddressRecord;
use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;

/// Accepted top-level shapes of the records file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    // [ {record}, ... ]
    List(Vec<AddressRecord>),
    // Exporter shape: { "group_addresses": { "<key>": {record}, ... } }
    Project {
        group_addresses: IndexMap<String, AddressRecord>,
    },
}

/// Load address records from a JSON file, preserving document order.
pub fn load_records(path: &str) -> anyhow::Result<Vec<AddressRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("read records file {}", path))?;
    parse_records(&text).with_context(|| format!("parse records file {}", path))
}

pub fn parse_records(text: &str) -> anyhow::Result<Vec<AddressRecord>> {
    let file: RecordsFile = serde_json::from_str(text)?;
    Ok(match file {
        RecordsFile::List(records) => records,
        RecordsFile::Project { group_addresses } => group_addresses.into_values().collect(),
    })
}
