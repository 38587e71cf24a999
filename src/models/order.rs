use crate::entities::{OrderStatus, course_entity, order_entity, order_item_entity};
use crate::models::CourseResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub course: CourseResponse,
    /// 下单时的价格快照
    #[schema(value_type = f64, example = 5000.0)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    #[schema(value_type = f64, example = 9500.0)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItemResponse>,
}

impl OrderItemResponse {
    pub fn new(item: order_item_entity::Model, course: course_entity::Model) -> Self {
        Self {
            id: item.id,
            course: course.into(),
            price: item.price,
        }
    }
}

impl OrderResponse {
    pub fn new(order: order_entity::Model, order_items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: order.id,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            order_items,
        }
    }
}
