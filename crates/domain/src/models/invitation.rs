//! Invitation domain models: link tokens, email rendering and masking.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Placeholder replaced with the issuing student's display label.
pub const STUDENT_NAME_PLACEHOLDER: &str = "%student_name%";

/// Placeholder replaced with the absolute recipient link.
pub const LINK_PLACEHOLDER: &str = "%link%";

/// Subject line of the invitation email.
pub const EMAIL_SUBJECT: &str = "Supervisor Evaluation";

/// Request to send an invitation to a recipient address.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendInvitationRequest {
    #[validate(email(message = "Please, enter valid email address"))]
    pub email: String,
}

/// Invitation details exposed to the issuing student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationInfo {
    /// Masked recipient address.
    pub email: String,
    /// Opaque link token.
    pub url_hash: String,
}

/// Response for the student-facing view initialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ViewInitResponse {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation: Option<InvitationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ViewInitResponse {
    /// No invitation exists (or the caller is in author mode).
    pub fn absent() -> Self {
        Self {
            result: false,
            invitation: None,
            link: None,
        }
    }

    pub fn found(invitation: InvitationInfo, link: String) -> Self {
        Self {
            result: true,
            invitation: Some(invitation),
            link: Some(link),
        }
    }
}

/// Survey content exposed to a recipient who resolved a link token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluationView {
    pub display_name: String,
    /// Reference to the content node holding the evaluation questions.
    pub evaluation_hash: String,
    /// Masked recipient address.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_fields: Option<serde_json::Value>,
}

/// Response for the recipient link resolver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolveResponse {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationView>,
}

impl ResolveResponse {
    pub fn absent() -> Self {
        Self {
            result: false,
            evaluation: None,
        }
    }

    pub fn found(evaluation: EvaluationView) -> Self {
        Self {
            result: true,
            evaluation: Some(evaluation),
        }
    }
}

/// Generates a fresh unguessable link token (random 128-bit identifier).
pub fn generate_url_hash() -> String {
    Uuid::new_v4().to_string()
}

/// Substitutes the template placeholders to build the plain-text email body.
pub fn render_invitation_text(template: &str, student_label: &str, link: &str) -> String {
    template
        .replace(STUDENT_NAME_PLACEHOLDER, student_label)
        .replace(LINK_PLACEHOLDER, link)
}

/// Derives the HTML email body from the plain-text one.
pub fn html_from_text(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Masks a recipient address for display to the issuing student.
///
/// The local part keeps its first character; the domain keeps its final
/// dot-segment, and everything before it is starred except the last
/// character. `john.doe@example.com` becomes `j*******@******e.com`.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "***".to_string();
    };

    let local_len = local.chars().count();
    let masked_local = match local.chars().next() {
        Some(first) => format!("{}{}", first, "*".repeat(local_len - 1)),
        None => String::new(),
    };

    let segments: Vec<&str> = domain.split('.').collect();
    if segments.len() < 2 {
        return format!("{}@{}", masked_local, "*".repeat(domain.chars().count()));
    }

    let front = segments[..segments.len() - 1].join(".");
    let tld = segments[segments.len() - 1];
    let masked_front = match front.chars().last() {
        Some(last) => format!("{}{}", "*".repeat(front.chars().count() - 1), last),
        None => String::new(),
    };

    format!("{}@{}.{}", masked_local, masked_front, tld)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_hash_is_uuid() {
        let hash = generate_url_hash();
        assert!(Uuid::parse_str(&hash).is_ok());
    }

    #[test]
    fn test_generate_url_hash_uniqueness() {
        let hashes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_url_hash()).collect();
        assert_eq!(hashes.len(), 100);
    }

    #[test]
    fn test_render_invitation_text() {
        let rendered = render_invitation_text(
            "Hello %student_name%, %link%",
            "Ann Smith (a@b.com)",
            "https://x/y/TOKEN",
        );
        assert_eq!(rendered, "Hello Ann Smith (a@b.com), https://x/y/TOKEN");
    }

    #[test]
    fn test_render_preserves_text_without_placeholders() {
        assert_eq!(
            render_invitation_text("no placeholders", "x", "y"),
            "no placeholders"
        );
    }

    #[test]
    fn test_html_from_text() {
        assert_eq!(
            html_from_text("Hello!\n\nSee: link"),
            "Hello!<br><br>See: link"
        );
    }

    #[test]
    fn test_mask_email_typical_address() {
        assert_eq!(mask_email("john.doe@example.com"), "j*******@******e.com");
    }

    #[test]
    fn test_mask_email_short_parts() {
        assert_eq!(mask_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_mask_email_multi_segment_domain() {
        // Front "mail.example.co" has 15 chars; 14 become stars.
        assert_eq!(
            mask_email("mentor@mail.example.co.uk"),
            "m*****@**************o.uk"
        );
    }

    #[test]
    fn test_mask_email_without_at_sign() {
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_mask_email_dotless_domain() {
        assert_eq!(mask_email("user@localhost"), "u***@*********");
    }

    #[test]
    fn test_view_init_response_serialization() {
        let absent = serde_json::to_value(ViewInitResponse::absent()).unwrap();
        assert_eq!(absent, serde_json::json!({"result": false}));

        let found = serde_json::to_value(ViewInitResponse::found(
            InvitationInfo {
                email: "j*******@******e.com".to_string(),
                url_hash: "abc".to_string(),
            },
            "https://host/evaluation/abc".to_string(),
        ))
        .unwrap();
        assert_eq!(
            found,
            serde_json::json!({
                "result": true,
                "invitation": {"email": "j*******@******e.com", "url_hash": "abc"},
                "link": "https://host/evaluation/abc"
            })
        );
    }

    #[test]
    fn test_resolve_response_serialization() {
        let absent = serde_json::to_value(ResolveResponse::absent()).unwrap();
        assert_eq!(absent, serde_json::json!({"result": false}));
    }

    #[test]
    fn test_send_invitation_request_validation() {
        let valid = SendInvitationRequest {
            email: "mentor@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SendInvitationRequest {
            email: "not-an-email".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
