//! Read cache for resolved links.

pub mod moka;

pub use self::moka::{CacheConfig, MokaLinkCache};
