//! Extracts normalized traffic-fatality records from police press-release
//! pages and the social-media card metadata embedded alongside them.
//!
//! Two independent pipelines populate the same field set — the free-text
//! content block and the compact `Label: value` social-post description —
//! and a sanitize/merge stage combines them into one record per decedent.
//! Fetching pages and persisting records are the caller's concern; this
//! crate is pure parsing.

pub mod dates;
pub mod error;
pub mod fields;
pub mod parser;
pub mod person;
pub mod text;

pub use error::ParseError;
pub use fields::{FatalityRecord, Field, FieldMap, FieldValue};
pub use parser::{parse_page, Records};
