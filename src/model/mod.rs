//! Model layer: tree aggregation, action table, documents and their references.

pub mod aggregate;
pub mod datapoint;
pub mod document;
pub mod reference;

pub use aggregate::{Level, PathStep, aggregate, aggregate_under};
pub use datapoint::actions_for;
pub use document::{GeneratedDocument, Target, action_url, build_actions, build_menu};
pub use reference::DocRef;
