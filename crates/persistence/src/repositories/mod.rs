//! Repository implementations for database operations.

pub mod block_config;
pub mod invitation;
pub mod survey_block;

pub use block_config::BlockConfigRepository;
pub use invitation::InvitationRepository;
pub use survey_block::SurveyBlockRepository;
