//! `gradcheck-catalog` — Course catalog service client and cache.
//!
//! Wraps the two catalog endpoints (known terms, class search by term +
//! department) behind a process-wide cache with deduplicated parallel bulk
//! population and most-recent-prior-offering fallback for future terms.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod offering;

pub use cache::CatalogCache;
pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use offering::{CourseOffering, RawClass};
