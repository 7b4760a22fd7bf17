//! Identity and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- same, but anonymous callers are allowed.
//! - [`rbac::RequireGuest`], [`rbac::RequireUser`], [`rbac::RequireAdmin`] --
//!   minimum role gates following the guest < user < admin hierarchy.

pub mod auth;
pub mod rbac;
