use crate::entities::{
    cart_item_entity as cart_items, order_entity as orders, order_item_entity as order_items,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

/// 以一次空更新锁定用户行，须作为事务内第一条语句执行。
///
/// PostgreSQL 上持有该行的行锁；SQLite 上取得数据库写锁，
/// 后到的事务在 busy_timeout 内等待前者提交后再读取。
pub(crate) async fn lock_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> AppResult<()> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::IsActive, Expr::col(users::Column::IsActive).into())
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 删除用户及其全部数据
    ///
    /// 不依赖外键级联，按顺序显式删除：购物车 -> 订单明细 -> 订单 -> 用户，
    /// 全部在一个事务内完成。
    pub async fn delete_user(&self, user_id: i32) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        lock_user(&txn, user_id).await?;

        let cart_deleted = cart_items::Entity::delete_many()
            .filter(cart_items::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let order_ids: Vec<i32> = orders::Entity::find()
            .select_only()
            .column(orders::Column::Id)
            .filter(orders::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !order_ids.is_empty() {
            order_items::Entity::delete_many()
                .filter(order_items::Column::OrderId.is_in(order_ids.clone()))
                .exec(&txn)
                .await?;
            orders::Entity::delete_many()
                .filter(orders::Column::Id.is_in(order_ids.clone()))
                .exec(&txn)
                .await?;
        }

        users::Entity::delete_by_id(user_id).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "User {} deleted with {} cart items and {} orders",
            user_id,
            cart_deleted,
            order_ids.len()
        );
        Ok(())
    }
}
