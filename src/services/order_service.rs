use crate::entities::{
    OrderStatus, course_entity as courses, order_entity as orders,
    order_item_entity as order_items,
};
use crate::error::{AppError, AppResult};
use crate::models::{OrderItemResponse, OrderResponse};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 用户订单列表，最新的在前，包含明细与课程信息
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<OrderResponse>> {
        let order_list = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.pool)
            .await?;

        if order_list.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = order_list.iter().map(|o| o.id).collect();
        let item_rows = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_items::Column::Id)
            .find_also_related(courses::Entity)
            .all(&self.pool)
            .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItemResponse>> = HashMap::new();
        for (item, course) in item_rows {
            let course = course.ok_or_else(|| {
                AppError::InternalError(format!(
                    "Course {} missing for order item {}",
                    item.course_id, item.id
                ))
            })?;
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItemResponse::new(item, course));
        }

        Ok(order_list
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderResponse::new(order, items)
            })
            .collect())
    }

    /// 在结算事务内创建订单及明细
    ///
    /// 只接受完整的购物车快照：明细不能为空，total 必须等于所有课程价格之和。
    /// 每条明细的 price 取自传入的课程当前价格，写入后不再随目录变化。
    pub(crate) async fn create_order_with_items(
        txn: &DatabaseTransaction,
        user_id: i32,
        total: Decimal,
        purchased: Vec<courses::Model>,
    ) -> AppResult<OrderResponse> {
        if purchased.is_empty() {
            return Err(AppError::InternalError(
                "Order must contain at least one item".to_string(),
            ));
        }
        let expected: Decimal = purchased.iter().map(|c| c.price).sum();
        if expected != total {
            return Err(AppError::InternalError(format!(
                "Order total {total} does not match item sum {expected}"
            )));
        }

        let order = orders::ActiveModel {
            user_id: Set(user_id),
            total_amount: Set(total),
            status: Set(OrderStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        let mut order_item_list = Vec::with_capacity(purchased.len());
        for course in purchased {
            let item = order_items::ActiveModel {
                order_id: Set(order.id),
                course_id: Set(course.id),
                price: Set(course.price),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            order_item_list.push(OrderItemResponse::new(item, course));
        }

        Ok(OrderResponse::new(order, order_item_list))
    }
}
