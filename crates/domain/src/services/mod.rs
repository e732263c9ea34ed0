//! Domain services for the Supervisor Evaluation backend.

pub mod i18n;

pub use i18n::{NoopTranslator, Translator};
