use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::batch;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBatchRequest {
    pub name: String,
    /// Starting date shared by students enrolled through this batch.
    pub year: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchResponse {
    pub batch_id: String,
    pub name: String,
    pub year: Option<NaiveDate>,
    pub is_active: bool,
}

impl From<batch::Model> for BatchResponse {
    fn from(model: batch::Model) -> Self {
        Self {
            batch_id: model.batch_id.to_string(),
            name: model.name,
            year: model.year,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchListResponse {
    pub total: usize,
    pub batches: Vec<BatchResponse>,
}
