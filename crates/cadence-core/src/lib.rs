//! Core types and trait definitions for the cadence habit tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod calendar;
pub mod day;
pub mod error;
pub mod habit;
pub mod service;
pub mod store;

pub use error::{Error, Result};
