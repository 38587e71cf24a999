use crate::entities::{cart_item_entity, course_entity};
use crate::models::CourseResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[schema(example = 1)]
    pub course_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i32,
    pub course: CourseResponse,
    pub created_at: DateTime<Utc>,
}

impl CartItemResponse {
    pub fn new(item: cart_item_entity::Model, course: course_entity::Model) -> Self {
        Self {
            id: item.id,
            course: course.into(),
            created_at: item.created_at,
        }
    }
}
