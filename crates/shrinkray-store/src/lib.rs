//! Store backends and connection management.
//!
//! A [`ConnectionSet`] holds three independent handles to one key-value
//! backend, one per [`Role`](shrinkray_core::Role). The [`LivenessMonitor`]
//! pings all three on a fixed interval and reports sustained loss of
//! connectivity as a fatal error.

pub mod connections;
pub mod liveness;
pub mod memory;
pub mod redis;

pub use connections::ConnectionSet;
pub use liveness::{HealthReport, HealthState, LivenessConfig, LivenessMonitor, MonitorError};
pub use memory::InMemoryHashStore;
pub use self::redis::{RedisHashStore, RedisSettings};
