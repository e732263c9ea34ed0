//! Custom Axum extractors.

pub mod student_auth;

#[allow(unused_imports)] // Re-exports for downstream use
pub use student_auth::StudentAuth;
