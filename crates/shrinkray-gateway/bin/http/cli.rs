use clap::{Parser, ValueEnum};
use shrinkray_gateway::telemetry::LogFormat;
use shrinkray_generator::{DEFAULT_ALPHABET, DEFAULT_KEY_SIZE};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SHRINKRAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SHRINKRAY_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SHRINKRAY_STORAGE_BACKEND";
pub const REDIS_HOST_ENV: &str = "SHRINKRAY_REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "SHRINKRAY_REDIS_PORT";
pub const REDIS_DB_ENV: &str = "SHRINKRAY_REDIS_DB";
pub const REDIS_USER_ENV: &str = "SHRINKRAY_REDIS_USER";
pub const REDIS_PASS_ENV: &str = "SHRINKRAY_REDIS_PASS";
pub const KEY_SIZE_ENV: &str = "SHRINKRAY_KEY_SIZE";
pub const ALPHABET_ENV: &str = "SHRINKRAY_ALPHABET";
pub const GEN_TRIES_ENV: &str = "SHRINKRAY_GEN_TRIES";
pub const CACHE_TTL_ENV: &str = "SHRINKRAY_CACHE_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "SHRINKRAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:11037";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11037";
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "redis")]
    Redis,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Redis => write!(f, "redis"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shrinkray-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public URL that short keys are appended to.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Redis
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_HOST_ENV, default_value = DEFAULT_REDIS_HOST)]
    pub redis_host: String,

    #[arg(long, env = REDIS_PORT_ENV, default_value_t = 6379)]
    pub redis_port: u16,

    #[arg(long, env = REDIS_DB_ENV, default_value_t = 0)]
    pub redis_db: i64,

    #[arg(long, env = REDIS_USER_ENV)]
    pub redis_user: Option<String>,

    #[arg(long, env = REDIS_PASS_ENV, hide_env_values = true)]
    pub redis_pass: Option<String>,

    #[arg(long, env = KEY_SIZE_ENV, default_value_t = DEFAULT_KEY_SIZE)]
    pub key_size: usize,

    #[arg(long, env = ALPHABET_ENV, default_value = DEFAULT_ALPHABET)]
    pub alphabet: String,

    /// Attempts at finding a free generated key before giving up.
    #[arg(long, env = GEN_TRIES_ENV, default_value_t = 100)]
    pub gen_tries: u32,

    #[arg(long, env = CACHE_TTL_ENV, default_value_t = 24 * 60 * 60)]
    pub cache_ttl_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
