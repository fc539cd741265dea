//! Resource entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ResourceKind;

/// An uploaded file plus metadata, attached to a subject.
///
/// Each resource exclusively owns one on-disk blob named `<id><ext>`;
/// deleting the row deletes the blob.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Original file name as uploaded.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Lowercase file extension including the leading dot, e.g. ".pdf".
    pub file_type: String,
    /// Resource category.
    pub resource_type: ResourceKind,
    /// The subject this resource belongs to.
    pub subject_id: Uuid,
    /// The user who uploaded it.
    pub uploaded_by: Uuid,
    /// Number of recorded downloads.
    pub download_count: i32,
    /// Whether the resource is visible to students.
    pub is_approved: bool,
    /// When the resource was created.
    pub created_at: DateTime<Utc>,
    /// When the resource was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Name of the on-disk blob backing this resource.
    pub fn blob_name(&self) -> String {
        format!("{}{}", self.id, self.file_type)
    }
}

/// Data required to create a new resource record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Lowercase extension including the dot.
    pub file_type: String,
    /// Resource category.
    pub resource_type: ResourceKind,
    /// Owning subject.
    pub subject_id: Uuid,
    /// Uploading user.
    pub uploaded_by: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_name() {
        let id = Uuid::new_v4();
        let resource = Resource {
            id,
            title: "DS Notes".into(),
            description: None,
            file_name: "ds-notes.pdf".into(),
            file_size: 1024,
            file_type: ".pdf".into(),
            resource_type: ResourceKind::Notes,
            subject_id: Uuid::new_v4(),
            uploaded_by: Uuid::new_v4(),
            download_count: 0,
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(resource.blob_name(), format!("{id}.pdf"));
    }
}
