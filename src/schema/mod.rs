//! Raw input schemas and batch validation.

pub mod records;
pub mod validator;

pub use records::{RawCatalogRecord, RawLogEvent, PAGE_NEXT_SONG};
pub use validator::{validate_batch, Validated};
