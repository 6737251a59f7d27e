pub mod dto;
pub mod model;
pub mod service;

pub use dto::CreateHistoryRequest;
pub use model::HistoryRecord;
pub use service::{HistoryService, DEFAULT_LIST_LIMIT};
