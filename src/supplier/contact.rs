use crate::form::FieldError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

pub const INVALID_EMAIL: &str = "email";
pub const INVALID_PHONE: &str = "phone";

const MIN_PHONE_DIGITS: usize = 6;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub kind: ContactKind,
    pub value: String,
}

impl Contact {
    pub fn email(value: &str) -> Self {
        Contact {
            id: None,
            kind: ContactKind::Email,
            value: value.to_string(),
        }
    }

    pub fn phone(value: &str) -> Self {
        Contact {
            id: None,
            kind: ContactKind::Phone,
            value: value.to_string(),
        }
    }

    /// Checks the value against its kind. Emptiness is reported by the caller.
    pub fn validate(&self) -> Option<FieldError> {
        let value = self.value.trim();
        match self.kind {
            ContactKind::Email if !EMAIL_REGEX.is_match(value) => Some(FieldError::new(
                INVALID_EMAIL,
                "El correo electrónico no es válido",
            )),
            ContactKind::Phone if !is_phone_number(value) => Some(FieldError::new(
                INVALID_PHONE,
                "El teléfono no es válido",
            )),
            ContactKind::Email | ContactKind::Phone => None,
        }
    }
}

fn is_phone_number(value: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    value.chars().all(allowed)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
