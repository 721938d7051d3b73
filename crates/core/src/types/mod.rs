//! Core type definitions.

mod book;
mod email;
mod favorite;
mod id;

pub use book::{
    Book, DESC_LOADING_PLACEHOLDER, FALLBACK_AUTHOR, FALLBACK_DESC, FALLBACK_TITLE,
    PLACEHOLDER_COVER, RawBook, clean_text,
};
pub use email::{Email, EmailError};
pub use favorite::FavoriteEntry;
pub use id::UserId;
