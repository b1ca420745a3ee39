//! Three-level group address.
//!
//! Example: "1/2/10"  =>  GroupAddress { main: "1", middle: "2", sub: "10" }
//!
//! Segments are opaque tokens; they are compared as strings, never as numbers.

use crate::error::{GenerateError, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupAddress {
    pub main: String,
    pub middle: String,
    pub sub: String,
}

impl GroupAddress {
    /// Parse "A/B/C". Anything other than exactly three segments is rejected;
    /// empty segments are ordinary tokens.
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || GenerateError::MalformedAddress {
            address: s.to_string(),
        };

        let mut parts = s.split('/');
        let (Some(main), Some(middle), Some(sub), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        Ok(Self {
            main: main.to_string(),
            middle: middle.to_string(),
            sub: sub.to_string(),
        })
    }

    /// Segment at depth 0, 1 or 2.
    pub fn segment(&self, depth: usize) -> &str {
        match depth {
            0 => &self.main,
            1 => &self.middle,
            _ => &self.sub,
        }
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main, self.middle, self.sub)
    }
}
