//! Duplicate-subject merge and branch canonicalization.
//!
//! Historical data accumulated duplicate subjects under legacy branch
//! spellings. `merge_duplicates` groups rows by their canonical identity,
//! keeps the oldest row of each group, re-points resources at it, and
//! deletes the rest. `fix_branches` first rewrites legacy branch values so
//! the merge sees one branch per group.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use campusvault_core::error::AppError;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_database::repositories::subject::SubjectRepository;
use campusvault_entity::subject::{branch, Subject, SubjectKey};

/// Outcome of a duplicate merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MergeOutcome {
    /// Duplicate rows removed.
    pub removed: usize,
    /// Distinct subjects kept.
    pub kept: usize,
    /// Resources re-pointed at a kept subject.
    pub resources_moved: u64,
}

/// Outcome of a branch canonicalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BranchFixOutcome {
    /// Subject rows whose branch value was rewritten.
    pub branches_renamed: u64,
    /// Result of the follow-up duplicate merge.
    pub merge: MergeOutcome,
}

/// Maintenance operations over the subject table.
#[derive(Debug, Clone)]
pub struct SubjectMaintenance {
    subject_repo: Arc<SubjectRepository>,
    resource_repo: Arc<ResourceRepository>,
}

impl SubjectMaintenance {
    /// Creates a new maintenance service.
    pub fn new(subject_repo: Arc<SubjectRepository>, resource_repo: Arc<ResourceRepository>) -> Self {
        Self {
            subject_repo,
            resource_repo,
        }
    }

    /// Merge duplicate subjects sharing a canonical identity.
    pub async fn merge_duplicates(&self) -> Result<MergeOutcome, AppError> {
        let all = self.subject_repo.find_all().await?;
        let groups = group_by_key(all);

        let mut removed = 0usize;
        let mut kept = 0usize;
        let mut resources_moved = 0u64;

        for (_, mut duplicates) in groups {
            // Oldest row wins; find_all returns creation order but sort
            // defensively anyway.
            duplicates.sort_by_key(|s| s.created_at);
            let keep = duplicates.remove(0);
            kept += 1;

            for dup in duplicates {
                resources_moved += self.resource_repo.reassign_subject(dup.id, keep.id).await?;
                self.subject_repo.delete(dup.id).await?;
                removed += 1;
                info!(
                    kept = %keep.id,
                    removed_subject = %dup.id,
                    code = %dup.code,
                    "Merged duplicate subject"
                );
            }
        }

        Ok(MergeOutcome {
            removed,
            kept,
            resources_moved,
        })
    }

    /// Rewrite legacy branch spellings to their canonical form, then merge
    /// the duplicates the rewrite exposes.
    pub async fn fix_branches(&self) -> Result<BranchFixOutcome, AppError> {
        let mut branches_renamed = 0u64;
        for (legacy, modern) in branch::LEGACY_ALIASES {
            let changed = self.subject_repo.rename_branch(legacy, modern).await?;
            if changed > 0 {
                info!(from = legacy, to = modern, rows = changed, "Renamed branch");
            }
            branches_renamed += changed;
        }

        let merge = self.merge_duplicates().await?;

        Ok(BranchFixOutcome {
            branches_renamed,
            merge,
        })
    }
}

/// Group subjects by their canonical five-column identity.
fn group_by_key(subjects: Vec<Subject>) -> HashMap<SubjectKey, Vec<Subject>> {
    let mut groups: HashMap<SubjectKey, Vec<Subject>> = HashMap::new();
    for subject in subjects {
        groups.entry(subject.key()).or_default().push(subject);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn subject(name: &str, code: &str, branch_name: &str) -> Subject {
        Subject {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into(),
            year: 2,
            semester: 1,
            branch: branch_name.into(),
            icon: "fas fa-book".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_grouping_unites_legacy_branch_spellings() {
        let groups = group_by_key(vec![
            subject("Algorithms", "CS201", "CSE"),
            subject("Algorithms", "CS201", "Computer Science"),
            subject("Physics", "PH101", "CSE"),
        ]);

        assert_eq!(groups.len(), 2);
        let algo_key = SubjectKey {
            name: "Algorithms".into(),
            code: "CS201".into(),
            year: 2,
            semester: 1,
            branch: "CSE".into(),
        };
        assert_eq!(groups[&algo_key].len(), 2);
    }

    #[test]
    fn test_distinct_codes_stay_separate() {
        let groups = group_by_key(vec![
            subject("Mathematics I", "MA101", "CSE"),
            subject("Mathematics II", "MA102", "CSE"),
        ]);
        assert_eq!(groups.len(), 2);
    }
}
