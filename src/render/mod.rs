//! Serialization of generated documents into the phone menu XML format.

pub mod xml;

pub use xml::render_menu_xml;
