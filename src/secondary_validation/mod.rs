mod cuit_checksum;

pub use crate::secondary_validation::cuit_checksum::{expected_check_digit, CuitChecksum};
pub(crate) use crate::secondary_validation::cuit_checksum::check_canonical;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, value: &str) -> bool;
}
