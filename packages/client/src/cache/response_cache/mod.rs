//! Response cache modules
//!
//! - `core`: ResponseCache struct, capacity knob and basic accessors
//! - `operations`: get, set-if-absent and revalidation replacement
//! - `eviction`: capacity reservation and victim selection
//!
//! Entries live in a sharded `DashMap`. A live-entry counter is reserved before
//! insertion so the configured capacity holds under concurrent writers, and no
//! eviction runs while a shard lock is held.

pub mod core;
pub mod eviction;
pub mod operations;

pub use core::ResponseCache;
