use std::fmt::Display;

use crate::{errors::ConversionError, id::DbId};

use super::{IdentityError, Role};

/// The authenticated user as reported by the backend
///
/// An identity is always fully populated. Both the login response and the
/// persisted copy are deserialized through [`IdentityRecord`] so a record
/// missing any required field never becomes an `Identity`.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "IdentityRecord", rename_all = "camelCase")]
pub struct Identity {
    id: DbId,
    email: Email,
    full_name: String,
    role: Role,
}

/// Represents an email address and is constrained to not be an empty string
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

/// Wire shape of a user record before validation. Unknown fields sent by the
/// backend (first name, manager...) are ignored.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    id: Option<DbId>,
    email: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    role: Option<Role>,
}

impl Identity {
    pub fn new(
        id: DbId,
        email: Email,
        full_name: String,
        role: Role,
    ) -> Result<Self, IdentityError> {
        if id.is_unset() {
            return Err(IdentityError::MissingField("id"));
        }
        Ok(Self {
            id,
            email,
            full_name,
            role,
        })
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Name to greet the user with, falls back to the email when the backend
    /// did not provide a name
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            self.email.as_ref()
        } else {
            &self.full_name
        }
    }
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = IdentityError;

    fn try_from(value: IdentityRecord) -> Result<Self, Self::Error> {
        let id = value.id.ok_or(IdentityError::MissingField("id"))?;
        let email = value.email.ok_or(IdentityError::MissingField("email"))?;
        let role = value.role.ok_or(IdentityError::MissingField("role"))?;
        Self::new(
            id,
            email.try_into()?,
            value.full_name.unwrap_or_default(),
            role,
        )
    }
}

impl Email {
    pub const MAX_LENGTH: usize = 254;
}

impl TryFrom<String> for Email {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Email {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
