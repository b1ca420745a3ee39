//! Generation layer: walks the address tree and emits linked documents.

pub mod check;
pub mod orchestrator;

pub use orchestrator::Generator;
