use crate::entities::{cart_item_entity as cart_items, course_entity as courses};
use crate::error::{AppError, AppResult};
use crate::models::CartItemResponse;
use crate::services::CatalogService;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

/// 购物车行及其关联课程（课程可能已被删除）
pub(crate) type CartLine = (cart_items::Model, Option<courses::Model>);

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
}

impl CartService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 加入购物车
    ///
    /// 课程必须存在且上架；同一用户同一课程只能存在一条记录。
    /// 并发重复添加时由 (user_id, course_id) 唯一索引兜底，失败方返回 DuplicateItem。
    pub async fn add(&self, user_id: i32, course_id: i32) -> AppResult<CartItemResponse> {
        let course = CatalogService::find_active(&self.pool, course_id).await?;

        let existing = cart_items::Entity::find()
            .filter(cart_items::Column::UserId.eq(user_id))
            .filter(cart_items::Column::CourseId.eq(course_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateItem(
                "Course already in cart".to_string(),
            ));
        }

        let item = cart_items::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Course already in cart"))?;

        Ok(CartItemResponse::new(item, course))
    }

    /// 移除购物车条目，只能删除属于自己的条目
    pub async fn remove(&self, user_id: i32, cart_item_id: i32) -> AppResult<bool> {
        let result = cart_items::Entity::delete_many()
            .filter(cart_items::Column::Id.eq(cart_item_id))
            .filter(cart_items::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        }
        Ok(true)
    }

    /// 购物车列表（按加入顺序）
    pub async fn list(&self, user_id: i32) -> AppResult<Vec<CartItemResponse>> {
        let lines = Self::lines_in(&self.pool, user_id).await?;
        Ok(lines
            .into_iter()
            .filter_map(|(item, course)| course.map(|c| CartItemResponse::new(item, c)))
            .collect())
    }

    /// 清空购物车，空购物车也返回成功
    pub async fn clear(&self, user_id: i32) -> AppResult<u64> {
        Ok(Self::clear_in(&self.pool, user_id).await?)
    }

    pub(crate) async fn lines_in<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
    ) -> Result<Vec<CartLine>, DbErr> {
        cart_items::Entity::find()
            .filter(cart_items::Column::UserId.eq(user_id))
            .order_by_asc(cart_items::Column::CreatedAt)
            .order_by_asc(cart_items::Column::Id)
            .find_also_related(courses::Entity)
            .all(conn)
            .await
    }

    pub(crate) async fn clear_in<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64, DbErr> {
        let result = cart_items::Entity::delete_many()
            .filter(cart_items::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
