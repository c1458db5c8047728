// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Netrino - Element Inventory Service
//!
//! This crate provides an HTTP inventory of infrastructure elements arranged
//! in a parent/child tree, each carrying typed interfaces whose metadata is
//! encrypted at rest, plus free-form tags.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token authorization (JWT roles)
//! - `interfaces` - Interface type schemas and registry
//! - `inventory` - Element operations over storage, cipher and registry
//! - `storage` - Embedded database (redb) and metadata cipher

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod inventory;
pub mod models;
pub mod state;
pub mod storage;
