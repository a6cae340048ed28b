//! Add-user form fields and the in-progress draft

use serde::{Deserialize, Serialize};

use crate::data::{Address, NewUser};

/// Phone value recorded for users created through the form
pub const PLACEHOLDER_PHONE: &str = "N/A";

/// Input fields of the add-user form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Street,
    City,
    Zip,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Street,
        Field::City,
        Field::Zip,
    ];

    /// Key used in messages and the persisted draft
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Street => "street",
            Field::City => "city",
            Field::Zip => "zip",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Street => "Street",
            Field::City => "City",
            Field::Zip => "ZIP Code",
        }
    }
}

/// Raw text typed into the form, persisted under `userFormData`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DraftForm {
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl DraftForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::Zip => &self.zip,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::Zip => &mut self.zip,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// Build the store candidate from trimmed values
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: PLACEHOLDER_PHONE.to_string(),
            address: Address {
                street: Some(self.street.trim().to_string()),
                city: self.city.trim().to_string(),
                zipcode: Some(self.zip.trim().to_string()),
            },
        }
    }
}
