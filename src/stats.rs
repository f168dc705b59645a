use crate::observability::labels::{Labels, NO_LABEL};
use crate::validation::CuitErrorKind;
use metrics::{counter, Counter};

const RESULT: &str = "result";

/// Counters emitted for every call to [crate::validate].
///
/// They are registered on each call rather than cached in a static, so that the
/// recorder installed at call time receives them.
pub struct ValidationMetrics {
    pub valid: Counter,
    pub absent: Counter,
    pub shape_error: Counter,
    pub checksum_error: Counter,
}

impl ValidationMetrics {
    pub fn new() -> Self {
        Self {
            valid: counter!("cuit.validations", RESULT => "valid"),
            absent: counter!("cuit.validations", RESULT => "absent"),
            shape_error: counter!(
                "cuit.validations",
                RESULT => CuitErrorKind::ShapeError.as_ref().to_string()
            ),
            checksum_error: counter!(
                "cuit.validations",
                RESULT => CuitErrorKind::ChecksumError.as_ref().to_string()
            ),
        }
    }

    pub fn for_error(&self, kind: CuitErrorKind) -> &Counter {
        match kind {
            CuitErrorKind::ShapeError => &self.shape_error,
            CuitErrorKind::ChecksumError => &self.checksum_error,
        }
    }
}

impl Default for ValidationMetrics {
    fn default() -> Self {
        ValidationMetrics::new()
    }
}

/// Counters of the asynchronous existence check.
pub struct ExistenceCheckMetrics {
    pub requests: Counter,
    pub errors: Counter,
    pub superseded: Counter,
}

impl ExistenceCheckMetrics {
    pub fn new(labels: &Labels) -> Self {
        Self {
            requests: counter!("cuit.existence_check.requests", labels.clone()),
            errors: counter!("cuit.existence_check.errors", labels.clone()),
            superseded: counter!("cuit.existence_check.superseded", labels.clone()),
        }
    }
}

impl Default for ExistenceCheckMetrics {
    fn default() -> Self {
        ExistenceCheckMetrics::new(&NO_LABEL)
    }
}
