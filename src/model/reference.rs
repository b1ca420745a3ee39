//! Document references, derived from the path segments visited so far.
//!
//! root          -> configured master name (e.g. "knx_multi")
//! main doc      -> "{main}-_-_"
//! middle doc    -> "{main}-{middle}-_"
//! leaf doc      -> "{main}-{middle}-{sub}"
//!
//! References are collision-free as long as no segment equals the placeholder.

use std::fmt;

pub const SEPARATOR: char = '-';
pub const PLACEHOLDER: &str = "_";
pub const FILE_EXTENSION: &str = "xml";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocRef {
    Root(String),
    Main(String),
    Middle(String, String),
    Leaf(String, String, String),
}

impl DocRef {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, FILE_EXTENSION)
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (main, middle, sub) = match self {
            DocRef::Root(name) => return f.write_str(name),
            DocRef::Main(main) => (main.as_str(), PLACEHOLDER, PLACEHOLDER),
            DocRef::Middle(main, middle) => (main.as_str(), middle.as_str(), PLACEHOLDER),
            DocRef::Leaf(main, middle, sub) => (main.as_str(), middle.as_str(), sub.as_str()),
        };
        write!(f, "{main}{SEPARATOR}{middle}{SEPARATOR}{sub}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn naming_scheme() {
        assert_eq!(DocRef::Root("knx_multi".into()).to_string(), "knx_multi");
        assert_eq!(DocRef::Main("A".into()).to_string(), "A-_-_");
        assert_eq!(DocRef::Middle("A".into(), "B".into()).to_string(), "A-B-_");
        assert_eq!(
            DocRef::Leaf("A".into(), "B".into(), "C".into()).file_name(),
            "A-B-C.xml"
        );
    }

    #[test]
    fn distinct_paths_never_collide() {
        let segs = ["0", "1", "10", "a"];
        let mut seen = BTreeSet::new();
        let mut count = 0;
        for m in segs {
            seen.insert(DocRef::Main(m.into()).to_string());
            count += 1;
            for n in segs {
                seen.insert(DocRef::Middle(m.into(), n.into()).to_string());
                count += 1;
                for s in segs {
                    seen.insert(DocRef::Leaf(m.into(), n.into(), s.into()).to_string());
                    count += 1;
                }
            }
        }
        assert_eq!(seen.len(), count);
    }
}
