//! Core types and traits for the Shrinkray URL shortener.
//!
//! This crate provides the types shared by the store, cache, and shortener
//! crates: validated short keys, encoded links, the status vocabulary exposed
//! to the transport layer, and the storage and cache traits.

pub mod cache;
pub mod error;
pub mod link;
pub mod shortkey;
pub mod status;
pub mod store;

pub use cache::LinkCache;
pub use error::{CacheError, KeyError, StoreError};
pub use link::Link;
pub use shortkey::ShortKey;
pub use status::Status;
pub use store::{HashStore, Role, HASH_TO_KEY_TABLE, KEY_TO_LINK_TABLE};
