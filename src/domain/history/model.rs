use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Caller id recorded when the request did not carry one
pub const ANONYMOUS_CALLER: &str = "anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub text: String,
    pub audio_url: String,
    pub caller_id: String,
    pub language: String,
    pub status: HistoryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum HistoryStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failed")]
    Failed,
}

impl std::fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryStatus::Pending => write!(f, "pending"),
            HistoryStatus::Success => write!(f, "success"),
            HistoryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl HistoryRecord {
    /// Build a record for a completed synthesis.
    ///
    /// A missing caller id is stored as [`ANONYMOUS_CALLER`].
    pub fn completed(
        text: String,
        audio_url: String,
        caller_id: Option<String>,
        language: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            audio_url,
            caller_id: caller_id.unwrap_or_else(|| ANONYMOUS_CALLER.to_string()),
            language,
            status: HistoryStatus::Success,
            created_at: Utc::now(),
        }
    }
}
