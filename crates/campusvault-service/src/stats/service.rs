//! Aggregate counts over resources and downloads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_database::repositories::download::DownloadRepository;
use campusvault_database::repositories::resource::ResourceRepository;

use crate::context::RequestContext;

/// Per-user aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Resources the user has uploaded.
    pub uploads: i64,
    /// Downloads the user has performed.
    pub downloads: i64,
    /// Total downloads of the user's uploads, across all users.
    pub total_downloads: i64,
}

/// Computes per-user aggregates with straight per-user filters and sums.
#[derive(Debug, Clone)]
pub struct StatsService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Download repository.
    download_repo: Arc<DownloadRepository>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(resource_repo: Arc<ResourceRepository>, download_repo: Arc<DownloadRepository>) -> Self {
        Self {
            resource_repo,
            download_repo,
        }
    }

    /// Computes stats for a user. Self or admin only.
    pub async fn user_stats(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<UserStats, AppError> {
        if !ctx.can_act_for(user_id) {
            return Err(AppError::forbidden("Cannot view another user's stats"));
        }

        let uploads = self.resource_repo.count_by_uploader(user_id).await?;
        let downloads = self.download_repo.count_by_user(user_id).await?;
        let total_downloads = self
            .resource_repo
            .total_downloads_of_uploader(user_id)
            .await?;

        Ok(UserStats {
            uploads,
            downloads,
            total_downloads,
        })
    }
}
