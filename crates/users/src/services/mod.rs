//! Business-logic services for the users service.

pub mod auth;
