//! Quills Core - Shared types library.
//!
//! This crate provides common types used across all Quills components:
//! - `users` - Auth/favorites service
//! - `gateway` - Reverse proxy in front of the backend services
//! - `client` - Client application state and reconciliation logic
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, the canonical book entity, and
//!   favorites wire shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
