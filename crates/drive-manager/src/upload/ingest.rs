//! Batch submission with bounded concurrency.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

use drive_core::config::upload::UploadConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::EntryId;
use drive_gateway::MutationGateway;

use super::source::{self, DroppedItem};
use super::{SelectedFile, UploadBatchResult, UploadFailure, UploadTask};

/// Turns selections and drops into upload tasks and submits them.
#[derive(Debug, Clone, Default)]
pub struct UploadIngestor {
    config: UploadConfig,
}

impl UploadIngestor {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// One task per selected file, named by the file alone.
    pub fn from_selection(
        files: Vec<SelectedFile>,
        target_parent_id: Option<EntryId>,
    ) -> Vec<UploadTask> {
        files
            .into_iter()
            .map(|file| UploadTask {
                blob: file.blob,
                relative_path: file.name,
                target_parent_id,
            })
            .collect()
    }

    /// Tasks for a drop, with directory structure kept in the paths.
    pub async fn from_drop(
        items: Vec<DroppedItem>,
        target_parent_id: Option<EntryId>,
    ) -> AppResult<Vec<UploadTask>> {
        source::flatten(items, target_parent_id).await
    }

    /// Upload every task, at most `concurrency` at a time and in task order
    /// when sequential. A failed or timed-out task is recorded and the batch
    /// carries on.
    pub async fn submit(
        &self,
        gateway: &dyn MutationGateway,
        tasks: Vec<UploadTask>,
    ) -> UploadBatchResult {
        let batch_id = Uuid::new_v4();
        let width = self.config.width();
        let timeout = self.config.task_timeout();
        info!(%batch_id, tasks = tasks.len(), width, "Starting upload batch");

        let limiter = Arc::new(Semaphore::new(width));
        let uploads = tasks.into_iter().map(|task| {
            let limiter = Arc::clone(&limiter);
            async move {
                let outcome = match limiter.acquire().await {
                    Ok(_permit) => {
                        let upload =
                            gateway.upload(task.blob, &task.relative_path, task.target_parent_id);
                        match tokio::time::timeout(timeout, upload).await {
                            Ok(result) => result.map(|_| ()),
                            Err(_) => Err(AppError::gateway(format!(
                                "Upload timed out after {}s",
                                timeout.as_secs()
                            ))),
                        }
                    }
                    Err(_) => Err(AppError::internal("Upload limiter closed")),
                };
                (task.relative_path, outcome)
            }
        });

        let mut result = UploadBatchResult::default();
        for (relative_path, outcome) in join_all(uploads).await {
            match outcome {
                Ok(()) => result.success_count += 1,
                Err(e) => {
                    warn!(%batch_id, path = %relative_path, error = %e, "Upload failed");
                    result.failure_count += 1;
                    result.failures.push(UploadFailure {
                        relative_path,
                        message: e.message,
                    });
                }
            }
        }

        info!(
            %batch_id,
            succeeded = result.success_count,
            failed = result.failure_count,
            "Upload batch finished"
        );
        result
    }
}
