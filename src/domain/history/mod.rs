pub mod model;
pub mod service;

pub use model::{HistoryRecord, HistoryStatus, ANONYMOUS_CALLER};
pub use service::{HistoryService, HistoryServiceApi};
