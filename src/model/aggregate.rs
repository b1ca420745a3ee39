//! Tree aggregation: group flat records by address segment at one level.
//!
//! A SegmentMap keeps segments in first-seen order. A segment that recurs
//! keeps its position but takes the most recently seen name.

use crate::error::Result;
use crate::input::AddressRecord;
use indexmap::IndexMap;

/// segment -> display name, in first-seen order.
pub type SegmentMap = IndexMap<String, String>;

/// Tree level. Selects both the address segment and the name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Main,
    Middle,
    Sub,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Main, Level::Middle, Level::Sub];

    pub fn depth(self) -> usize {
        match self {
            Level::Main => 0,
            Level::Middle => 1,
            Level::Sub => 2,
        }
    }
}

/// One already-chosen ancestor on the way down the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub segment: String,
    pub name: String,
}

impl PathStep {
    pub fn new(segment: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            name: name.into(),
        }
    }
}

/// Aggregate all records at `level`.
pub fn aggregate(records: &[AddressRecord], level: Level) -> Result<SegmentMap> {
    aggregate_under(records, level, &[])
}

/// Aggregate at `level`, considering only records below `parent`.
///
/// `parent[i]` must match the record's segment *and* name at depth i. A record
/// that reuses a segment under a different name belongs to another branch.
pub fn aggregate_under(
    records: &[AddressRecord],
    level: Level,
    parent: &[PathStep],
) -> Result<SegmentMap> {
    let mut out = SegmentMap::new();
    for record in records {
        if !is_under(record, parent)? {
            continue;
        }
        let ga = record.segments()?;
        out.insert(
            ga.segment(level.depth()).to_string(),
            record.name_at(level).to_string(),
        );
    }
    Ok(out)
}

/// True if the record lies on the path described by `path`.
pub fn is_under(record: &AddressRecord, path: &[PathStep]) -> Result<bool> {
    let ga = record.segments()?;
    Ok(path.iter().zip(Level::ALL).all(|(step, level)| {
        ga.segment(level.depth()) == step.segment && record.name_at(level) == step.name
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use pretty_assertions::assert_eq;

    fn rec(address: &str, main: &str, middle: &str, name: &str) -> AddressRecord {
        AddressRecord {
            address: address.to_string(),
            main_name: main.to_string(),
            middle_name: middle.to_string(),
            name: name.to_string(),
            datapoint_type: None,
        }
    }

    fn pairs(map: &SegmentMap) -> Vec<(&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(aggregate(&[], Level::Main).unwrap().is_empty());
    }

    #[test]
    fn first_seen_order_per_level() {
        let records = vec![
            rec("2/0/0", "Garden", "Pump", "Run"),
            rec("1/4/0", "House", "Floor2", "Blind"),
            rec("1/3/5", "House", "Floor1", "Light"),
            rec("2/0/1", "Garden", "Pump", "Stop"),
        ];

        assert_eq!(
            pairs(&aggregate(&records, Level::Main).unwrap()),
            vec![("2", "Garden"), ("1", "House")]
        );
        assert_eq!(
            pairs(&aggregate(&records, Level::Middle).unwrap()),
            vec![("0", "Pump"), ("4", "Floor2"), ("3", "Floor1")]
        );
        assert_eq!(
            pairs(&aggregate(&records, Level::Sub).unwrap()),
            vec![("0", "Blind"), ("5", "Light"), ("1", "Stop")]
        );
    }

    #[test]
    fn duplicates_collapse_and_last_name_wins() {
        let records = vec![
            rec("1/1/1", "House", "F", "a"),
            rec("2/1/1", "Garden", "F", "b"),
            rec("1/1/2", "House", "F", "c"),
            rec("1/1/3", "Home", "F", "d"),
        ];
        let map = aggregate(&records, Level::Main).unwrap();
        // "1" keeps its first position but holds the latest name.
        assert_eq!(pairs(&map), vec![("1", "Home"), ("2", "Garden")]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            rec("1/1/1", "House", "F1", "a"),
            rec("1/2/1", "House", "F2", "b"),
            rec("1/1/1", "House", "F1", "a"),
        ];
        for level in Level::ALL {
            assert_eq!(
                aggregate(&records, level).unwrap(),
                aggregate(&records, level).unwrap()
            );
        }
    }

    #[test]
    fn filtered_by_segment_and_name() {
        let records = vec![
            rec("1/1/1", "House", "Floor1", "Light"),
            rec("1/2/1", "House", "Floor2", "Blind"),
            // Same main segment reused under another label: different branch.
            rec("1/3/1", "Annex", "Cellar", "Fan"),
            rec("2/1/1", "Garden", "Floor1", "Pump"),
        ];

        let house = [PathStep::new("1", "House")];
        assert_eq!(
            pairs(&aggregate_under(&records, Level::Middle, &house).unwrap()),
            vec![("1", "Floor1"), ("2", "Floor2")]
        );

        let floor1 = [PathStep::new("1", "House"), PathStep::new("1", "Floor1")];
        assert_eq!(
            pairs(&aggregate_under(&records, Level::Sub, &floor1).unwrap()),
            vec![("1", "Light")]
        );
    }

    #[test]
    fn malformed_address_is_an_error() {
        let records = vec![rec("1/1/1", "a", "b", "c"), rec("1/1", "a", "b", "c")];
        let err = aggregate(&records, Level::Main).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedAddress { .. }));
    }
}
