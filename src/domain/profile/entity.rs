use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extended user record completed after the first sign-in
///
/// Field names follow the backend's camelCase JSON. The backend may send
/// `null` for fields the user never filled in; those read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,

    /// Always the Google account email; never edited by the client
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_number: String,

    /// `YYYY-MM-DD` when sent; the backend may answer with a full timestamp
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_of_birth: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,

    /// Raw registration kind. Kept as a string because an incomplete
    /// profile legitimately carries `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub register_as: String,

    /// Set by the backend once the form has been submitted at least once
    #[serde(default)]
    pub is_profile_submitted: bool,
}

impl Profile {
    /// Blank profile carrying only the session email
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::ContactNumber => &self.contact_number,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::Country => &self.country,
            ProfileField::Address => &self.address,
            ProfileField::RegisterAs => &self.register_as,
        }
    }

    /// Identity fields that decide between the card and the form
    pub fn is_complete(&self) -> bool {
        [
            ProfileField::FirstName,
            ProfileField::LastName,
            ProfileField::RegisterAs,
        ]
        .iter()
        .all(|field| !self.value(*field).trim().is_empty())
    }

    pub fn registration_kind(&self) -> Option<RegistrationKind> {
        self.register_as.parse().ok()
    }

    pub fn is_company(&self) -> bool {
        self.registration_kind() == Some(RegistrationKind::Company)
    }
}

/// The choice between company and sales-representative behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    Company,
    Sales,
}

impl RegistrationKind {
    pub const ALL: [RegistrationKind; 2] = [RegistrationKind::Company, RegistrationKind::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationKind::Company => "company",
            RegistrationKind::Sales => "sales",
        }
    }

    /// Label shown on the profile card
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationKind::Company => "Company",
            RegistrationKind::Sales => "Sales Representative",
        }
    }
}

impl FromStr for RegistrationKind {
    type Err = String;

    /// Exact match only: `"Company"` or `" sales"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(RegistrationKind::Company),
            "sales" => Ok(RegistrationKind::Sales),
            other => Err(format!("Unknown registration kind: {:?}", other)),
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every field of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    ContactNumber,
    DateOfBirth,
    Country,
    Address,
    RegisterAs,
}

impl ProfileField {
    /// Fields the user must fill before submitting, in form order.
    /// Email is excluded because it comes from the session.
    pub const REQUIRED: [ProfileField; 7] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::ContactNumber,
        ProfileField::DateOfBirth,
        ProfileField::Country,
        ProfileField::Address,
        ProfileField::RegisterAs,
    ];

    /// Fields frozen once persisted with a non-empty value
    pub const IMMUTABLE_ONCE_SAVED: [ProfileField; 4] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::DateOfBirth,
        ProfileField::RegisterAs,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Email => "email",
            ProfileField::ContactNumber => "contactNumber",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Country => "country",
            ProfileField::Address => "address",
            ProfileField::RegisterAs => "registerAs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "First Name",
            ProfileField::LastName => "Last Name",
            ProfileField::Email => "Email ID",
            ProfileField::ContactNumber => "Contact Number",
            ProfileField::DateOfBirth => "Date of Birth",
            ProfileField::Country => "Country",
            ProfileField::Address => "Address",
            ProfileField::RegisterAs => "Register As",
        }
    }

    pub fn is_immutable_once_saved(&self) -> bool {
        Self::IMMUTABLE_ONCE_SAVED.contains(self)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
