use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::notice;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub message: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoticeResponse {
    pub notice_id: String,
    pub title: String,
    pub message: Option<String>,
    pub image_path: Option<String>,
    pub attachment_path: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<notice::Model> for NoticeResponse {
    fn from(model: notice::Model) -> Self {
        Self {
            notice_id: model.notice_id.to_string(),
            title: model.title,
            message: model.message,
            image_path: model.image_path,
            attachment_path: model.attachment_path,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoticeListResponse {
    pub total: usize,
    pub notices: Vec<NoticeResponse>,
}
