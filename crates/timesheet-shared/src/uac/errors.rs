use crate::errors::ConversionError;

/// Reasons a user record (persisted or from the backend) is not a usable
/// identity
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] ConversionError),
}
