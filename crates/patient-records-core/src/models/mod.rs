//! Domain models for the patient records system.

mod audit;
mod check_in;
mod document;
mod patient;
mod user;

pub use audit::*;
pub use check_in::*;
pub use document::*;
pub use patient::*;
pub use user::*;

/// Generate an identifier for a newly created record.
pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
