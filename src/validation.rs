use crate::normalization::normalize;
use crate::secondary_validation::check_canonical;
use crate::stats::ValidationMetrics;
use strum::{AsRefStr, Display};
use thiserror::Error;

pub const SHAPE_ERROR_MESSAGE: &str = "El CUIT debe tener 11 dígitos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CuitValidationError {
    /// The normalized value is not exactly 11 ASCII digits.
    #[error("El CUIT debe tener 11 dígitos")]
    InvalidShape,

    /// The value is well formed but its last digit does not match the computed one.
    #[error("Dígito verificador inválido: se esperaba {expected} y se recibió {received}")]
    ChecksumMismatch { expected: u32, received: u32 },
}

/// Machine readable discriminant of a [CuitValidationError].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CuitErrorKind {
    ShapeError,
    ChecksumError,
}

impl CuitValidationError {
    pub fn kind(&self) -> CuitErrorKind {
        match self {
            CuitValidationError::InvalidShape => CuitErrorKind::ShapeError,
            CuitValidationError::ChecksumMismatch { .. } => CuitErrorKind::ChecksumError,
        }
    }

    /// Human readable message, suitable for display next to the form field.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Validates a raw CUIT as typed by a user.
///
/// An absent or empty value is valid: whether the field is required is checked
/// elsewhere. Hyphens and spaces are ignored. The value must then be exactly 11
/// digits whose last digit matches the mod 11 checksum of the first ten.
pub fn validate(raw: Option<&str>) -> Result<(), CuitValidationError> {
    let metrics = ValidationMetrics::new();

    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            metrics.absent.increment(1);
            return Ok(());
        }
    };

    let result = check_canonical(&normalize(raw));
    match &result {
        Ok(()) => metrics.valid.increment(1),
        Err(err) => metrics.for_error(err.kind()).increment(1),
    }
    result
}
