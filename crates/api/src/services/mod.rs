//! Application services.

pub mod email;

#[allow(unused_imports)] // Re-exports for downstream use
pub use email::{EmailError, EmailMessage, EmailService};
