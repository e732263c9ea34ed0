//! Shared utilities and common types for the Supervisor Evaluation backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT encoding/decoding for host-issued identity tokens
//! - Common validation logic (expiration date/time patterns)

pub mod jwt;
pub mod validation;
