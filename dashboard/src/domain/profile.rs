//! Authorization records and the access state derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{OrganizationId, Principal, UserId};

/// Role a user acts under inside an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees aggregated summaries and the full transaction list.
    Owner,
    /// Registers entries and uploads files only.
    Employee,
}

impl Role {
    /// Wire representation stored in the profile table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization record for one user inside one organization.
///
/// ## Invariants
/// - Exactly one profile exists per user per organization.
/// - `owner_id` is the account entries are attributed to, whoever creates
///   them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Principal the profile belongs to.
    pub user_id: UserId,
    /// Tenant every query is scoped to.
    pub organization_id: OrganizationId,
    /// Role granted inside the tenant.
    pub role: Role,
    /// Tenant owner entries roll up under.
    pub owner_id: UserId,
}

/// Resolved access state for the current session.
///
/// Consumers match on this exhaustively instead of probing optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No session is present.
    Anonymous,
    /// Signed in, but no profile has been provisioned for the account yet.
    Unprovisioned {
        /// The signed-in principal lacking a profile.
        principal: Principal,
    },
    /// Signed in as the tenant owner.
    Owner(UserProfile),
    /// Signed in as an attendant.
    Employee(UserProfile),
}

impl Access {
    /// Classify a profile lookup for the given principal.
    pub fn from_lookup(principal: Principal, profile: Option<UserProfile>) -> Self {
        match profile {
            None => Self::Unprovisioned { principal },
            Some(profile) => match profile.role {
                Role::Owner => Self::Owner(profile),
                Role::Employee => Self::Employee(profile),
            },
        }
    }

    /// Borrow the profile when one is resolved.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Owner(profile) | Self::Employee(profile) => Some(profile),
            Self::Anonymous | Self::Unprovisioned { .. } => None,
        }
    }
}
