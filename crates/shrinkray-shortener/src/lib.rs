//! Key-space management for the Shrinkray URL shortener.
//!
//! [`LinkService`] ties together the deduplication index, the key table,
//! key assignment and the read cache. The [`Operations`] trait is the
//! boundary handed to transports: every call returns an [`Outcome`] that
//! pairs a [`Status`](shrinkray_core::Status) with the result.

pub mod assign;
pub mod config;
pub mod dedup;
pub mod error;
pub mod operations;
pub mod service;
pub mod table;

pub use assign::KeyAssigner;
pub use config::ShortenerConfig;
pub use dedup::DedupIndex;
pub use error::{ConfigError, LinkError};
pub use operations::{validate_raw_link, Operations, Outcome};
pub use service::LinkService;
pub use table::KeyTable;
