use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::feedback;
use crate::entities::sea_orm_active_enums::{FeedbackTarget, FeedbackType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeacherFeedbackRequest {
    pub teacher_id: Uuid,
    pub rating: f64,
    pub feedback_text: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParentTeacherFeedbackRequest {
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub rating: f64,
    pub feedback_text: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InstituteFeedbackRequest {
    #[serde(default = "default_feedback_type")]
    pub feedback_type: FeedbackType,
    pub rating: f64,
    pub feedback_text: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

fn default_feedback_type() -> FeedbackType {
    FeedbackType::General
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub feedback_id: String,
    pub target_kind: FeedbackTarget,
    pub feedback_type: FeedbackType,
    pub rating: f64,
    pub feedback_text: String,
    pub is_anonymous: bool,
    /// "Anonymous" when the anonymity flag is set; the stored actor key is
    /// untouched.
    pub display_name: String,
}

impl FeedbackResponse {
    pub fn from_model(model: feedback::Model, actor_name: &str) -> Self {
        let display_name = if model.is_anonymous {
            "Anonymous".to_string()
        } else {
            actor_name.to_string()
        };
        Self {
            feedback_id: model.feedback_id.to_string(),
            target_kind: model.target_kind,
            feedback_type: model.feedback_type,
            rating: model.rating(),
            feedback_text: model.feedback_text,
            is_anonymous: model.is_anonymous,
            display_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackListResponse {
    pub total: usize,
    pub feedback: Vec<FeedbackResponse>,
}
