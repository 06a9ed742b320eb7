use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::HistoryRepository,
};
use super::HistoryRecord;
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 100;

pub struct HistoryService {
    history_repo: Option<Arc<dyn HistoryRepository>>,
}

impl HistoryService {
    pub fn new(history_repo: Option<Arc<dyn HistoryRepository>>) -> Self {
        Self { history_repo }
    }
}

#[async_trait]
pub trait HistoryServiceApi: Send + Sync {
    /// List history records newest first, optionally only those of one caller
    async fn list_history(
        &self,
        caller_id: Option<String>,
        limit: Option<i64>,
    ) -> AppResult<Vec<HistoryRecord>>;
}

#[async_trait]
impl HistoryServiceApi for HistoryService {
    async fn list_history(
        &self,
        caller_id: Option<String>,
        limit: Option<i64>,
    ) -> AppResult<Vec<HistoryRecord>> {
        let repo = self
            .history_repo
            .as_ref()
            .ok_or_else(|| AppError::Configuration("DATABASE_URL is not set".to_string()))?;

        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(AppError::BadRequest(format!(
                "Limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }

        let caller_id = caller_id.filter(|id| !id.trim().is_empty());

        repo.list(caller_id.as_deref(), limit).await
    }
}
