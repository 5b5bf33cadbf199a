//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed recipe repository using Diesel ORM,
//!   plus an in-memory repository for local runs and tests.
//! - **cache**: in-process recipe cache and the cache-aside decorator.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod persistence;
