mod contact;
mod supply_item;

pub use contact::{Contact, ContactKind};
pub use supply_item::SupplyItem;

use crate::form::{cuit_field_error, required, FieldError, FieldErrors};
use crate::formatting::format;
use crate::normalization::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DUPLICATE: &str = "duplicate";

/// A supplier as edited in the create/edit screens and exchanged with the backend.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub business_name: String,
    pub cuit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub supplies: Vec<SupplyItem>,
}

impl Supplier {
    pub fn new(business_name: &str, cuit: &str) -> Self {
        Supplier {
            business_name: business_name.to_string(),
            cuit: cuit.to_string(),
            ..Default::default()
        }
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.push(contact);
        self
    }

    pub fn with_supply(mut self, supply: SupplyItem) -> Self {
        self.supplies.push(supply);
        self
    }

    /// Client side validation of the supplier form. Whether the CUIT is already
    /// registered is checked separately, see [crate::ExistenceChecker].
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.add("businessName", required(Some(&self.business_name)));
        errors.add("cuit", required(Some(&self.cuit)));
        errors.add("cuit", cuit_field_error(Some(&self.cuit)));

        for (idx, contact) in self.contacts.iter().enumerate() {
            let field = format!("contacts[{idx}].value");
            errors.add(field.clone(), required(Some(&contact.value)));
            errors.add(field, contact.validate());
        }

        let mut seen = HashSet::new();
        for (idx, supply) in self.supplies.iter().enumerate() {
            errors.add(format!("supplies[{idx}].unitPrice"), supply.validate());
            if !seen.insert((supply.supply_id, supply.packaging_id)) {
                errors.add(
                    format!("supplies[{idx}]"),
                    Some(FieldError::new(
                        DUPLICATE,
                        "El insumo ya figura con el mismo envase",
                    )),
                );
            }
        }

        errors.into_result()
    }

    /// Copy of the supplier as sent to the backend, with the CUIT in canonical form.
    pub fn to_payload(&self) -> Supplier {
        Supplier {
            cuit: normalize(&self.cuit),
            ..self.clone()
        }
    }

    /// CUIT as displayed in read-only views.
    pub fn display_cuit(&self) -> String {
        format(&self.cuit)
    }
}
