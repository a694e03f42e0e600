//! Container fixtures for integration tests.

pub mod error;
pub mod redis;

pub use error::{Result, TestInfraError};
pub use self::redis::RedisServer;
