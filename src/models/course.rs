use crate::entities::course_entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_COURSE_LIMIT: u64 = 100;
pub const MAX_COURSE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 5000.0)]
    pub price: Decimal,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub level: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 课程列表分页参数（skip/limit 形式）
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl CourseQuery {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self { skip, limit }
    }

    pub fn get_offset(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    pub fn get_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_COURSE_LIMIT)
            .min(MAX_COURSE_LIMIT)
    }
}

impl From<course_entity::Model> for CourseResponse {
    fn from(m: course_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            price: m.price,
            instructor: m.instructor,
            duration: m.duration,
            level: m.level,
            image_url: m.image_url,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
