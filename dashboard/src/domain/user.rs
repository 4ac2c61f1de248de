//! Identity primitives: platform user ids, tenant ids and the signed-in
//! principal.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier is not a canonical UUID string.
    InvalidUuid,
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::InvalidUuid => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

fn parse_uuid(raw: &str) -> Result<Uuid, IdentifierValidationError> {
    if raw.is_empty() {
        return Err(IdentifierValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdentifierValidationError::InvalidUuid);
    }
    Uuid::parse_str(raw).map_err(|_| IdentifierValidationError::InvalidUuid)
}

/// Stable identifier of an authenticated platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from a UUID string.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierValidationError> {
        parse_uuid(id.as_ref()).map(Self)
    }

    /// Generate a random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentifierValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Tenant scope every query and insert is filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    /// Validate and construct an [`OrganizationId`] from a UUID string.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierValidationError> {
        parse_uuid(id.as_ref()).map(Self)
    }

    /// Generate a random [`OrganizationId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<OrganizationId> for String {
    fn from(value: OrganizationId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = IdentifierValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The authenticated principal observed from the current session.
///
/// The client only ever sees the stable user id and, when the platform
/// provides one, the email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    email: Option<String>,
}

impl Principal {
    /// Build a principal from its session attributes.
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// Stable identifier of the principal.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Email address attached to the session, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdentifierValidationError::Empty)]
    #[case("not-a-uuid", IdentifierValidationError::InvalidUuid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", IdentifierValidationError::InvalidUuid)]
    fn user_id_rejects_invalid_input(
        #[case] raw: &str,
        #[case] expected: IdentifierValidationError,
    ) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn identifiers_round_trip_through_json() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let user_id = UserId::new(raw).expect("valid id");
        let json = serde_json::to_string(&user_id).expect("serialise");
        assert_eq!(json, format!("\"{raw}\""));

        let org: OrganizationId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(org.to_string(), raw);
    }
}
