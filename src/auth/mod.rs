// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authorization for the inventory API.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. Server:
//!    - Verifies the HS256 signature against `JWT_SECRET` (production mode)
//!      or only decodes the token (development mode, `JWT_SECRET` unset)
//!    - Checks expiry with 60 seconds of clock skew
//!    - Extracts `sub` and `role` (`admin` | `viewer`, default `viewer`)
//!
//! ## Policies
//!
//! - [`ViewAccess`] - `infrastructure:view`, any authenticated role
//! - [`AdminAccess`] - `infrastructure:admin`, `admin` only
//!
//! Health and API documentation endpoints are public.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::{AdminAccess, Auth, ViewAccess};
pub use roles::Role;
