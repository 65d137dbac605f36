//! Bounded caching with idle expiry.
//!
//! This crate provides a small keyed cache that can be bounded by entry count
//! (least recently used entries are evicted first) and by idle time (entries
//! not accessed within the TTL expire). Both bounds are optional; with
//! neither set the cache retains entries until they are removed.

#![warn(missing_docs)]

mod cache;

pub use cache::{BoundedCache, CacheConfig, CacheConfigBuilder};
