//! Student identity as provided by the host platform.

use uuid::Uuid;

/// Identity of the person interacting with the block, decoded from the
/// host-issued token. Not persisted by this service.
#[derive(Debug, Clone)]
pub struct StudentIdentity {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_id: String,
    /// Course staff interact with the block in author mode.
    pub staff: bool,
}

impl StudentIdentity {
    /// Label substituted for `%student_name%`: `"First Last (email)"`,
    /// falling back to the username when both name fields are blank.
    pub fn invitation_label(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        let name = if name.is_empty() {
            self.username.clone()
        } else {
            name
        };
        format!("{} ({})", name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: &str, last: &str) -> StudentIdentity {
        StudentIdentity {
            user_id: Uuid::new_v4(),
            username: "astudent".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "a@b.com".to_string(),
            course_id: "course-1".to_string(),
            staff: false,
        }
    }

    #[test]
    fn test_label_with_full_name() {
        assert_eq!(identity("Ann", "Smith").invitation_label(), "Ann Smith (a@b.com)");
    }

    #[test]
    fn test_label_with_partial_name() {
        assert_eq!(identity("", "Smith").invitation_label(), "Smith (a@b.com)");
        assert_eq!(identity("Ann", "").invitation_label(), "Ann (a@b.com)");
    }

    #[test]
    fn test_label_falls_back_to_username() {
        assert_eq!(identity("", "").invitation_label(), "astudent (a@b.com)");
    }
}
