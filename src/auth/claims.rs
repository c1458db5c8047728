// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims read from a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Expiration timestamp, `0` when absent
    #[serde(default)]
    pub exp: i64,

    /// Role name (`admin` or `viewer`)
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated user information extracted from a JWT.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Token subject
    pub user_id: String,

    pub role: Role,
}

impl AuthenticatedUser {
    /// Create from token claims. Missing or unknown roles fall back to
    /// [`Role::Viewer`].
    pub fn from_claims(claims: Claims) -> Self {
        let role = claims
            .role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or_default();

        Self {
            user_id: claims.sub,
            role,
        }
    }

    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Option<&str>) -> Claims {
        Claims {
            sub: "user_123".to_string(),
            exp: 1700003600,
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn from_claims_extracts_user_and_role() {
        let user = AuthenticatedUser::from_claims(claims(Some("admin")));
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.role, Role::Admin);
        assert!(user.has_role(Role::Viewer));
    }

    #[test]
    fn from_claims_defaults_to_viewer() {
        assert_eq!(AuthenticatedUser::from_claims(claims(None)).role, Role::Viewer);
        assert_eq!(
            AuthenticatedUser::from_claims(claims(Some("root"))).role,
            Role::Viewer
        );
    }
}
