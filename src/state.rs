// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use jsonwebtoken::DecodingKey;

use crate::inventory::Inventory;

/// Bearer token verification settings.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// HS256 key; `None` runs in development mode (signatures not checked)
    pub decoding_key: Option<DecodingKey>,
}

impl AuthConfig {
    pub fn from_secret(secret: Option<&str>) -> Self {
        Self {
            decoding_key: secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
        }
    }

    pub fn is_production(&self) -> bool {
        self.decoding_key.is_some()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("production", &self.is_production())
            .finish()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub inventory: Inventory,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            auth_config: AuthConfig::default(),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }
}
