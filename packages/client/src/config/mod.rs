//! Request engine configuration
//!
//! Process defaults, per-builder timeout resolution and the shareable
//! connection pool object.

use std::time::Duration;

pub mod pool;
pub mod timeouts;
pub mod validation;

pub use pool::CustomPool;
pub use timeouts::TimeoutConfig;
pub use validation::ConfigurationError;

/// Response-header wait used when a builder sets no override.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Dial timeout used when a builder sets no override.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(1500);

/// Idle connections kept per host by a default pool.
pub const DEFAULT_MAX_IDLE_CONNS_PER_HOST: usize = 2;

/// How long an idle pooled connection is kept open.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Maximum redirect hops followed when redirect-follow is enabled.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// `User-Agent` sent when a builder sets none.
pub const DEFAULT_USER_AGENT: &str = concat!("restful-rs/", env!("CARGO_PKG_VERSION"));

/// Capacity of a Cache Store created without explicit configuration.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 100_000;
