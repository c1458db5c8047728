// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Interface types registered at startup.

use std::sync::Arc;

use super::schema::{DeclarativeSchema, FieldKind, FieldSpec, InterfaceSchema};

const PORT: FieldKind = FieldKind::Integer { min: 1, max: 65535 };

/// SSH management access.
pub fn ssh() -> DeclarativeSchema {
    DeclarativeSchema::new(
        "ssh",
        "SSH management access",
        vec![
            FieldSpec::required("host", FieldKind::String).describe("Hostname or address"),
            FieldSpec::optional("port", PORT).with_default(22),
            FieldSpec::required("username", FieldKind::String),
            FieldSpec::optional("password", FieldKind::Secret),
            FieldSpec::optional("private_key", FieldKind::Secret)
                .describe("PEM encoded private key"),
        ],
    )
}

/// NETCONF over SSH.
pub fn netconf() -> DeclarativeSchema {
    DeclarativeSchema::new(
        "netconf",
        "NETCONF over SSH",
        vec![
            FieldSpec::required("host", FieldKind::String).describe("Hostname or address"),
            FieldSpec::optional("port", PORT).with_default(830),
            FieldSpec::required("username", FieldKind::String),
            FieldSpec::optional("password", FieldKind::Secret),
            FieldSpec::optional("private_key", FieldKind::Secret)
                .describe("PEM encoded private key"),
        ],
    )
}

/// SNMP polling.
pub fn snmp() -> DeclarativeSchema {
    DeclarativeSchema::new(
        "snmp",
        "SNMP polling",
        vec![
            FieldSpec::required("host", FieldKind::String).describe("Hostname or address"),
            FieldSpec::optional("port", PORT).with_default(161),
            FieldSpec::optional("version", FieldKind::Choice(&["1", "2c", "3"]))
                .with_default("2c"),
            FieldSpec::optional("community", FieldKind::Secret).describe("v1/v2c community"),
            FieldSpec::optional("username", FieldKind::String).describe("v3 security name"),
            FieldSpec::optional("auth_key", FieldKind::Secret),
            FieldSpec::optional("priv_key", FieldKind::Secret),
        ],
    )
}

/// All built-in interface types.
pub fn all() -> Vec<Arc<dyn InterfaceSchema>> {
    vec![Arc::new(ssh()), Arc::new(netconf()), Arc::new(snmp())]
}
