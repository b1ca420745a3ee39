//! Input layer: the flat record list handed over by the project-file exporter.
//!
//! Owns:
//! - GroupAddress (parsed "main/middle/sub")
//! - AddressRecord + DatapointType (serde-friendly)
//! - JSON loading

pub mod addr;
pub mod load;
pub mod record;

pub use addr::GroupAddress;
pub use load::load_records;
pub use record::{AddressRecord, DatapointType};
