//! Core types and trait definitions for the top-1% income share dataset.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends only on `serde`.

pub mod geo;
pub mod record;
pub mod report;
pub mod store;
