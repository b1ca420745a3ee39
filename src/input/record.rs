use crate::error::Result;
use crate::input::GroupAddress;
use crate::model::Level;
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A single group address as handed over by the project-file exporter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressRecord {
    pub address: String,

    #[serde(default)]
    pub main_name: String,

    #[serde(default)]
    pub middle_name: String,

    #[serde(default)]
    pub name: String,

    /// Absent when the leaf has no controllable action.
    #[serde(
        default,
        alias = "dpt_type",
        alias = "dpt",
        deserialize_with = "deserialize_datapoint"
    )]
    pub datapoint_type: Option<DatapointType>,
}

impl AddressRecord {
    pub fn segments(&self) -> Result<GroupAddress> {
        GroupAddress::parse(&self.address)
    }

    /// Display name recorded for the given level.
    pub fn name_at(&self, level: Level) -> &str {
        match level {
            Level::Main => &self.main_name,
            Level::Middle => &self.middle_name,
            Level::Sub => &self.name,
        }
    }
}

/// Datapoint type of a leaf: `{"main": 1, "sub": 1}` or `"DPST-1-1"`.
///
/// `main` is None when the exporter declared a type without a main number;
/// such a type has no actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatapointType {
    pub main: Option<u16>,
    pub sub: Option<u16>,
}

impl DatapointType {
    #[cfg(test)]
    pub fn new(main: u16) -> Self {
        Self {
            main: Some(main),
            sub: None,
        }
    }
}

/// null and `{}` mean "no datapoint type"; any other object is a declared type.
fn deserialize_datapoint<'de, D>(d: D) -> std::result::Result<Option<DatapointType>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = |v: Option<&Value>| v.and_then(Value::as_u64).and_then(|n| u16::try_from(n).ok());

    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(DatapointType {
            main: number(map.get("main")),
            sub: number(map.get("sub")),
        })),
        Value::String(text) => parse_dpt_string(&text).map(Some).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected datapoint object or DPT string, got {}",
            other
        ))),
    }
}

/// Parse "DPT-1" or "DPST-1-1".
fn parse_dpt_string(s: &str) -> std::result::Result<DatapointType, String> {
    const DPT_RE: &str = r#"^\s*DPS?T-(\d+)(?:-(\d+))?\s*$"#;
    let re = Regex::new(DPT_RE).map_err(|e| e.to_string())?;

    let caps = re
        .captures(s)
        .ok_or_else(|| format!("cannot parse datapoint type {:?}", s))?;

    let main = Some(
        caps[1]
            .parse::<u16>()
            .map_err(|e| format!("bad datapoint main type in {:?}: {}", s, e))?,
    );
    let sub = match caps.get(2) {
        Some(m) => Some(
            m.as_str()
                .parse::<u16>()
                .map_err(|e| format!("bad datapoint subtype in {:?}: {}", s, e))?,
        ),
        None => None,
    };

    Ok(DatapointType { main, sub })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_object_datapoint() {
        let rec: AddressRecord = serde_json::from_str(
            r#"{"address": "1/2/3", "main_name": "House", "middle_name": "Floor1",
                "name": "Light", "dpt_type": {"main": 1, "sub": 1}}"#,
        )
        .unwrap();
        assert_eq!(
            rec.datapoint_type,
            Some(DatapointType {
                main: Some(1),
                sub: Some(1)
            })
        );
        assert_eq!(rec.name_at(Level::Main), "House");
        assert_eq!(rec.name_at(Level::Middle), "Floor1");
        assert_eq!(rec.name_at(Level::Sub), "Light");
    }

    #[test]
    fn deserializes_string_datapoint() {
        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt": "DPST-3-7"}"#).unwrap();
        assert_eq!(
            rec.datapoint_type,
            Some(DatapointType {
                main: Some(3),
                sub: Some(7)
            })
        );

        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "datapoint_type": "DPT-5"}"#).unwrap();
        assert_eq!(rec.datapoint_type, Some(DatapointType::new(5)));
    }

    #[test]
    fn missing_and_null_datapoint_are_none() {
        let rec: AddressRecord = serde_json::from_str(r#"{"address": "1/2/3"}"#).unwrap();
        assert_eq!(rec.datapoint_type, None);

        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt": null}"#).unwrap();
        assert_eq!(rec.datapoint_type, None);
    }

    #[test]
    fn empty_datapoint_object_is_none() {
        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt_type": {}}"#).unwrap();
        assert_eq!(rec.datapoint_type, None);
    }

    #[test]
    fn datapoint_without_main_is_declared_but_unknown() {
        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt_type": {"sub": 1}}"#).unwrap();
        assert_eq!(
            rec.datapoint_type,
            Some(DatapointType {
                main: None,
                sub: Some(1)
            })
        );

        let rec: AddressRecord =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt": {"main": "binary"}}"#).unwrap();
        assert_eq!(
            rec.datapoint_type,
            Some(DatapointType {
                main: None,
                sub: None
            })
        );
    }

    #[test]
    fn two_datapoint_spellings_are_ambiguous() {
        let res: serde_json::Result<AddressRecord> = serde_json::from_str(
            r#"{"address": "1/2/3", "dpt": {"main": 1}, "dpt_type": {"main": 3}}"#,
        );
        let err = res.unwrap_err().to_string();
        assert!(err.contains("duplicate field"), "{err}");
    }

    #[test]
    fn rejects_non_object_datapoint() {
        let res: serde_json::Result<AddressRecord> =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt": 1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_garbage_datapoint_string() {
        let res: serde_json::Result<AddressRecord> =
            serde_json::from_str(r#"{"address": "1/2/3", "dpt": "switch"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn segments_surface_malformed_address() {
        let rec: AddressRecord = serde_json::from_str(r#"{"address": "1/2"}"#).unwrap();
        assert!(rec.segments().is_err());
    }
}
