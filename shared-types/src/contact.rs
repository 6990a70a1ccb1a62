use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A phone book entry as exchanged over the API.
///
/// The surrogate row id lives only in storage and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub address: String,
    pub email: String,
}

/// Form fields accepted by `POST /contacts/new/`.
///
/// Absent fields decode as empty strings so handlers can report them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CreateContactForm {
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub address: String,
    pub email: String,
}

impl CreateContactForm {
    /// True when every field carries a value.
    pub fn is_complete(&self) -> bool {
        !self.phone_number.is_empty()
            && !self.full_name.is_empty()
            && !self.address.is_empty()
            && !self.email.is_empty()
    }

    pub fn into_contact(self) -> Contact {
        Contact {
            phone_number: self.phone_number,
            full_name: self.full_name,
            address: self.address,
            email: self.email,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct DeleteContactByNameForm {
    #[serde(rename = "fullname")]
    pub full_name: String,
}

/// Search term for `POST /contacts/search/`, a case-insensitive POSIX
/// regular expression matched against the full name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct SearchContactForm {
    pub search: String,
}
