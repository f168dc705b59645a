use crate::existence_check::ExistenceStatus;
use crate::validation::{validate, CuitErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REQUIRED: &str = "required";
pub const CUIT_SHAPE: &str = "cuitShape";
pub const CUIT_CHECKSUM: &str = "cuitChecksum";
pub const CUIT_EXISTS: &str = "cuitExists";

/// Error attached to a single form field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        FieldError {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Errors of a whole form, keyed by field path (e.g. `contacts[1].value`).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `field`. The first error recorded for a field wins.
    pub fn add(&mut self, field: impl Into<String>, error: Option<FieldError>) {
        if let Some(error) = error {
            self.0.entry(field.into()).or_insert(error);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn required(value: Option<&str>) -> Option<FieldError> {
    match value {
        Some(value) if !value.trim().is_empty() => None,
        _ => Some(FieldError::new(REQUIRED, "Este campo es obligatorio")),
    }
}

/// Maps the CUIT validation result to the error shown under the field.
pub fn cuit_field_error(raw: Option<&str>) -> Option<FieldError> {
    let err = validate(raw).err()?;
    let code = match err.kind() {
        CuitErrorKind::ShapeError => CUIT_SHAPE,
        CuitErrorKind::ChecksumError => CUIT_CHECKSUM,
    };
    Some(FieldError::new(code, err.message()))
}

/// Only a CUIT known to be registered produces an error. Failed or superseded
/// checks leave the field untouched.
pub fn existence_field_error(status: &ExistenceStatus) -> Option<FieldError> {
    match status {
        ExistenceStatus::Exists => Some(FieldError::new(
            CUIT_EXISTS,
            "Ya existe un proveedor con este CUIT",
        )),
        ExistenceStatus::NotChecked
        | ExistenceStatus::Superseded
        | ExistenceStatus::Error(_)
        | ExistenceStatus::Available => None,
    }
}
