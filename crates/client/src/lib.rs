//! Quills client application logic.
//!
//! Everything a UI shell needs short of rendering: session bootstrap over
//! a stored bearer token, book search with normalization, detail-record
//! merging, favorite toggling with server write-through, and hash routing.
//! Backend access sits behind traits so the state logic tests with fakes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod router;
pub mod state;
pub mod token;

pub use api::{ApiError, AuthSession, BooksApi, GatewayClient, SessionUser, UsersApi};
pub use app::{App, ToggleOutcome};
pub use router::Route;
pub use state::AppState;
pub use token::{MemoryTokenStore, TokenStore};
