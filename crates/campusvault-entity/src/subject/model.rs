//! Subject entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::branch;

/// A course entity scoped by year, semester, and branch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: Uuid,
    /// Course name, e.g. "Database Systems".
    pub name: String,
    /// Course code, e.g. "CS204".
    pub code: String,
    /// Study year (1-4).
    pub year: i32,
    /// Semester within the year (1 or 2).
    pub semester: i32,
    /// Academic branch.
    pub branch: String,
    /// Icon class for the client, e.g. "fas fa-book".
    pub icon: String,
    /// When the subject was created.
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// The five-column identity used for duplicate detection.
    pub fn key(&self) -> SubjectKey {
        SubjectKey {
            name: self.name.clone(),
            code: self.code.clone(),
            year: self.year,
            semester: self.semester,
            branch: branch::canonical(&self.branch).to_string(),
        }
    }
}

/// The (name, code, year, semester, branch) identity of a subject.
///
/// Branch is stored canonicalized so legacy spellings group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    /// Course name.
    pub name: String,
    /// Course code.
    pub code: String,
    /// Study year.
    pub year: i32,
    /// Semester.
    pub semester: i32,
    /// Canonical branch.
    pub branch: String,
}

/// Data required to create a new subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubject {
    /// Course name.
    pub name: String,
    /// Course code.
    pub code: String,
    /// Study year (1-4).
    pub year: i32,
    /// Semester (1 or 2).
    pub semester: i32,
    /// Academic branch.
    pub branch: String,
    /// Icon class.
    pub icon: String,
}

/// Partial subject update. Only name, code, and icon are editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubject {
    /// New course name.
    pub name: Option<String>,
    /// New course code.
    pub code: Option<String>,
    /// New icon class.
    pub icon: Option<String>,
}
