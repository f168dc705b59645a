// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod existence_check;
mod form;
mod formatting;
mod normalization;
mod observability;
mod secondary_validation;
mod stats;
mod supplier;
mod tokio;
mod validation;

// This is the public API of the CUIT core library
pub use existence_check::{
    CuitExistenceLookup, ExistenceCheckConfig, ExistenceCheckConfigError, ExistenceChecker,
    ExistenceStatus, HttpExistenceLookup, HttpStatusCodeRange, LookupError,
};
pub use form::{cuit_field_error, existence_field_error, required, FieldError, FieldErrors};
pub use formatting::{format, format_opt};
pub use normalization::{normalize, normalize_opt};
pub use observability::labels::Labels;
pub use secondary_validation::{expected_check_digit, CuitChecksum, Validator};
pub use supplier::{Contact, ContactKind, Supplier, SupplyItem};
pub use validation::{validate, CuitErrorKind, CuitValidationError, SHAPE_ERROR_MESSAGE};

/// Number of digits of a canonical CUIT, check digit included.
pub const CUIT_LENGTH: usize = 11;
