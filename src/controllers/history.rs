use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::history::{HistoryRecord, HistoryService, HistoryServiceApi},
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

pub struct HistoryController {
    history_service: Arc<HistoryService>,
}

impl HistoryController {
    pub fn new(history_service: Arc<HistoryService>) -> Self {
        Self { history_service }
    }

    /// GET /api/history - List history records, newest first
    pub async fn list_history(
        State(controller): State<Arc<HistoryController>>,
        query: Result<Query<HistoryQuery>, QueryRejection>,
    ) -> AppResult<Json<Vec<HistoryRecord>>> {
        let Query(query) = query
            .map_err(|e| AppError::BadRequest(format!("Invalid query: {}", e.body_text())))?;

        let records = controller
            .history_service
            .list_history(query.user_id, query.limit)
            .await?;
        Ok(Json(records))
    }
}
