//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Study year.
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: i32,
    /// Academic branch. Defaults when omitted.
    pub branch: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New full name.
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    /// New study year.
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: Option<i32>,
    /// New branch.
    pub branch: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Create subject request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    /// Course name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Course code.
    #[validate(length(min = 1, max = 20, message = "Code is required"))]
    pub code: String,
    /// Study year.
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: i32,
    /// Semester.
    #[validate(range(min = 1, max = 2, message = "Semester must be 1 or 2"))]
    pub semester: i32,
    /// Academic branch. Defaults when omitted.
    pub branch: Option<String>,
    /// Icon class. Defaults when omitted.
    pub icon: Option<String>,
}

/// Update subject request (admin). Only name, code, and icon are editable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSubjectRequest {
    /// New course name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New course code.
    #[validate(length(min = 1, max = 20))]
    pub code: Option<String>,
    /// New icon class.
    pub icon: Option<String>,
}

/// Query parameters for subject listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectListQuery {
    /// Branch filter; the default branch when omitted.
    pub branch: Option<String>,
}

/// Query parameters for resource listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceListQuery {
    /// Resource type filter.
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.edu".into(),
            password: "plum-Tractor-91".into(),
            full_name: "Alice Doe".into(),
            year: 2,
            branch: None,
        };
        assert!(ok.validate().is_ok());

        let bad_year = RegisterRequest { year: 5, ..ok.clone() };
        assert!(bad_year.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_subject_request_validation() {
        let ok = CreateSubjectRequest {
            name: "Algorithms".into(),
            code: "CS201".into(),
            year: 2,
            semester: 1,
            branch: Some("CSE".into()),
            icon: None,
        };
        assert!(ok.validate().is_ok());

        let bad_semester = CreateSubjectRequest { semester: 3, ..ok };
        assert!(bad_semester.validate().is_err());
    }
}
