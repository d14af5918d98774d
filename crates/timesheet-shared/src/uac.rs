//! Shared items related to user account control

mod errors;
mod identity;
mod role;
mod section;
mod visibility;

pub use errors::IdentityError;
pub use identity::{Email, Identity, IdentityRecord};
pub use role::Role;
pub use section::{Section, UnknownSectionError};
pub use visibility::{Capability, Visibility};
