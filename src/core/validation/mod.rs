//! Request body validation
//!
//! Payloads pass through three steps before reaching a handler: serde
//! deserialization, the [`Sanitize`] filters, then the `validator` rules
//! declared on the payload type.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::{Validated, parse_entity_id};
pub use filters::Sanitize;
