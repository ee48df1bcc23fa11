//! Upload batch configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for batch uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Number of tasks in flight at once. `1` uploads sequentially.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Timeout for a single upload task, in seconds.
    #[serde(default = "default_task_timeout")]
    pub task_timeout_seconds: u64,
    /// Maximum entries returned by one directory read during traversal.
    #[serde(default = "default_page_size")]
    pub directory_page_size: usize,
}

impl UploadConfig {
    /// Effective worker width, never below one.
    pub fn width(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Per-task timeout as a [`Duration`], never below one second.
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_seconds.max(1))
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            task_timeout_seconds: default_task_timeout(),
            directory_page_size: default_page_size(),
        }
    }
}

fn default_concurrency() -> usize {
    1
}

fn default_task_timeout() -> u64 {
    300
}

fn default_page_size() -> usize {
    100
}
