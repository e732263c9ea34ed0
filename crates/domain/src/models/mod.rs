//! Domain models for the Supervisor Evaluation backend.

pub mod block_config;
pub mod invitation;
pub mod response;
pub mod student;
pub mod survey_block;

pub use block_config::{
    parse_expiration, split_expiration, validate_save_request, ConfigError, EditorContext,
    SaveConfigRequest, ValidatedConfig, DEFAULT_DISPLAY_NAME, DEFAULT_EMAIL_TEXT,
};
pub use invitation::{
    generate_url_hash, html_from_text, mask_email, render_invitation_text, EvaluationView,
    InvitationInfo, ResolveResponse, SendInvitationRequest, ViewInitResponse, EMAIL_SUBJECT,
    LINK_PLACEHOLDER, STUDENT_NAME_PLACEHOLDER,
};
pub use response::HandlerResult;
pub use student::StudentIdentity;
pub use survey_block::{SurveyBlockOption, SurveyBlocksResponse};
