use crate::normalization::normalize;
use crate::secondary_validation::Validator;
use crate::validation::CuitValidationError;
use crate::CUIT_LENGTH;

pub struct CuitChecksum;

const CHECKSUM_WEIGHTS: [u32; CUIT_LENGTH - 1] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Computes the check digit for the first ten digits of a CUIT.
///
/// `11 - (sum % 11)`, where an out of range result is remapped: 11 becomes 0 and
/// 10 becomes 9.
pub fn expected_check_digit(digits: &[u32; CUIT_LENGTH - 1]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip(CHECKSUM_WEIGHTS.iter())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match 11 - (sum % 11) {
        11 => 0,
        10 => 9,
        check_digit => check_digit,
    }
}

/// Splits a canonical value into its digits, most significant first.
/// Returns `None` unless the value is exactly 11 ASCII digits.
fn split_digits(canonical: &str) -> Option<[u32; CUIT_LENGTH]> {
    let mut digits = [0; CUIT_LENGTH];
    let mut chars = canonical.chars();
    for slot in digits.iter_mut() {
        // `to_digit` only accepts ASCII digits
        *slot = chars.next()?.to_digit(10)?;
    }
    if chars.next().is_some() {
        return None;
    }
    Some(digits)
}

/// Shape and checksum verification of an already normalized value.
pub(crate) fn check_canonical(canonical: &str) -> Result<(), CuitValidationError> {
    let digits = split_digits(canonical).ok_or(CuitValidationError::InvalidShape)?;

    let (body, check) = digits.split_at(CUIT_LENGTH - 1);
    let mut weighted = [0; CUIT_LENGTH - 1];
    weighted.copy_from_slice(body);

    let expected = expected_check_digit(&weighted);
    let received = check[0];
    if expected != received {
        return Err(CuitValidationError::ChecksumMismatch { expected, received });
    }
    Ok(())
}

impl Validator for CuitChecksum {
    // https://es.wikipedia.org/wiki/Clave_%C3%9Anica_de_Identificaci%C3%B3n_Tributaria
    fn is_valid_match(&self, value: &str) -> bool {
        check_canonical(&normalize(value)).is_ok()
    }
}
