use crate::error::{AppError, AppResult};
use crate::models::OrderResponse;
use crate::services::user_service::lock_user;
use crate::services::{CartService, OrderService};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};

#[derive(Clone)]
pub struct CheckoutService {
    pool: DatabaseConnection,
}

impl CheckoutService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 结算 (Checkout)
    ///
    /// 逻辑:
    /// 1. 开启事务并锁定用户行，同一用户的并发结算在此串行化
    /// 2. 在事务内读取购物车及课程当前价格
    /// 3. 购物车为空 -> EmptyCart，不产生任何写入
    /// 4. 任一课程已下架或不存在 -> CourseUnavailable，整单放弃
    /// 5. 按当前价格计算总额，创建订单与明细（价格快照）
    /// 6. 清空购物车后提交
    ///
    /// 任一步骤出错时事务未提交即被丢弃，数据库回滚，购物车保持原样。
    pub async fn checkout(&self, user_id: i32) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        lock_user(&txn, user_id).await?;

        let lines = CartService::lines_in(&txn, user_id).await?;
        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let mut purchased = Vec::with_capacity(lines.len());
        for (item, course) in lines {
            match course {
                Some(course) if course.is_active => purchased.push(course),
                _ => return Err(AppError::CourseUnavailable(item.course_id)),
            }
        }

        let total: Decimal = purchased.iter().map(|c| c.price).sum();
        let order =
            OrderService::create_order_with_items(&txn, user_id, total, purchased).await?;

        let cleared = CartService::clear_in(&txn, user_id).await?;

        txn.commit().await?;

        log::info!(
            "Order {} created for user {}: {} items, total {}",
            order.id,
            user_id,
            cleared,
            order.total_amount
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_shared_test_pool, create_test_pool};
    use crate::entities::{OrderStatus, order_entity as orders, order_item_entity as order_items};
    use crate::test_support::{deactivate_course, seed_course, seed_user, set_course_price};
    use rust_decimal_macros::dec;
    use sea_orm::{EntityTrait, PaginatorTrait};

    struct Fixture {
        pool: DatabaseConnection,
        cart: CartService,
        checkout: CheckoutService,
        orders: OrderService,
    }

    async fn fixture() -> Fixture {
        let pool = create_test_pool().await;
        Fixture {
            cart: CartService::new(pool.clone()),
            checkout: CheckoutService::new(pool.clone()),
            orders: OrderService::new(pool.clone()),
            pool,
        }
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;

        assert!(matches!(
            f.checkout.checkout(user.id).await,
            Err(AppError::EmptyCart)
        ));
        assert_eq!(orders::Entity::find().count(&f.pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_checkout_creates_order_and_clears_cart() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;
        let web = seed_course(&f.pool, "Web development", dec!(5000.0)).await;
        let design = seed_course(&f.pool, "Design", dec!(4500.0)).await;
        f.cart.add(user.id, web.id).await.unwrap();
        f.cart.add(user.id, design.id).await.unwrap();

        let order = f.checkout.checkout(user.id).await.unwrap();

        assert_eq!(order.total_amount, dec!(9500.0));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[0].course.id, web.id);
        assert_eq!(order.order_items[0].price, dec!(5000.0));
        assert_eq!(order.order_items[1].course.id, design.id);
        assert_eq!(order.order_items[1].price, dec!(4500.0));
        let item_sum: Decimal = order.order_items.iter().map(|i| i.price).sum();
        assert_eq!(item_sum, order.total_amount);

        assert!(f.cart.list(user.id).await.unwrap().is_empty());
        assert_eq!(order_items::Entity::find().count(&f.pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_price_change_after_checkout_keeps_snapshot() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;
        let web = seed_course(&f.pool, "Web development", dec!(5000.0)).await;
        f.cart.add(user.id, web.id).await.unwrap();

        let order = f.checkout.checkout(user.id).await.unwrap();
        set_course_price(&f.pool, web.id, dec!(7000.0)).await;

        let listed = f.orders.list_for_user(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, order.id);
        assert_eq!(listed[0].total_amount, dec!(5000.0));
        assert_eq!(listed[0].order_items[0].price, dec!(5000.0));
        assert_eq!(listed[0].order_items[0].course.price, dec!(7000.0));
    }

    #[tokio::test]
    async fn test_checkout_uses_current_catalog_price() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;
        let web = seed_course(&f.pool, "Web development", dec!(5000.0)).await;
        f.cart.add(user.id, web.id).await.unwrap();
        set_course_price(&f.pool, web.id, dec!(4000.0)).await;

        let order = f.checkout.checkout(user.id).await.unwrap();
        assert_eq!(order.total_amount, dec!(4000.0));
        assert_eq!(order.order_items[0].price, dec!(4000.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_checkouts_produce_one_order() {
        let pool = create_shared_test_pool().await;
        let user = seed_user(&pool, "a@example.com").await;
        let web = seed_course(&pool, "Web development", dec!(5000.0)).await;
        let design = seed_course(&pool, "Design", dec!(4500.0)).await;
        let cart = CartService::new(pool.clone());
        let checkout = CheckoutService::new(pool.clone());
        let user_id = user.id;

        for round in 1..=5u64 {
            cart.add(user.id, web.id).await.unwrap();
            cart.add(user.id, design.id).await.unwrap();

            let first = tokio::spawn({
                let checkout = checkout.clone();
                async move { checkout.checkout(user_id).await }
            });
            let second = tokio::spawn({
                let checkout = checkout.clone();
                async move { checkout.checkout(user_id).await }
            });
            let results = [first.await.unwrap(), second.await.unwrap()];

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert_eq!(
                results
                    .iter()
                    .filter(|r| matches!(r, Err(AppError::EmptyCart)))
                    .count(),
                1
            );
            assert_eq!(orders::Entity::find().count(&pool).await.unwrap(), round);
            assert_eq!(
                order_items::Entity::find().count(&pool).await.unwrap(),
                round * 2
            );
            assert!(cart.list(user.id).await.unwrap().is_empty());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_checkouts_of_different_users_both_succeed() {
        let pool = create_shared_test_pool().await;
        let alice = seed_user(&pool, "alice@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let web = seed_course(&pool, "Web development", dec!(5000.0)).await;
        let cart = CartService::new(pool.clone());
        let checkout = CheckoutService::new(pool.clone());
        cart.add(alice.id, web.id).await.unwrap();
        cart.add(bob.id, web.id).await.unwrap();
        let (alice_id, bob_id) = (alice.id, bob.id);

        let a = tokio::spawn({
            let checkout = checkout.clone();
            async move { checkout.checkout(alice_id).await }
        });
        let b = tokio::spawn({
            let checkout = checkout.clone();
            async move { checkout.checkout(bob_id).await }
        });

        assert!(a.await.unwrap().is_ok());
        assert!(b.await.unwrap().is_ok());
        let order_service = OrderService::new(pool.clone());
        assert_eq!(order_service.list_for_user(alice_id).await.unwrap().len(), 1);
        assert_eq!(order_service.list_for_user(bob_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deactivated_course_aborts_checkout() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;
        let web = seed_course(&f.pool, "Web development", dec!(5000.0)).await;
        let design = seed_course(&f.pool, "Design", dec!(4500.0)).await;
        f.cart.add(user.id, web.id).await.unwrap();
        f.cart.add(user.id, design.id).await.unwrap();
        deactivate_course(&f.pool, design.id).await;

        let result = f.checkout.checkout(user.id).await;
        assert!(matches!(result, Err(AppError::CourseUnavailable(id)) if id == design.id));

        assert_eq!(orders::Entity::find().count(&f.pool).await.unwrap(), 0);
        assert_eq!(order_items::Entity::find().count(&f.pool).await.unwrap(), 0);
        assert_eq!(f.cart.list(user.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_checkout_unknown_user() {
        let f = fixture().await;
        assert!(matches!(
            f.checkout.checkout(777).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() {
        let f = fixture().await;
        let user = seed_user(&f.pool, "a@example.com").await;
        let web = seed_course(&f.pool, "Web development", dec!(5000.0)).await;
        let design = seed_course(&f.pool, "Design", dec!(4500.0)).await;
        let python = seed_course(&f.pool, "Python", dec!(6000.0)).await;

        let mut created = Vec::new();
        for course in [&web, &design, &python] {
            f.cart.add(user.id, course.id).await.unwrap();
            created.push(f.checkout.checkout(user.id).await.unwrap().id);
        }

        let listed = f.orders.list_for_user(user.id).await.unwrap();
        assert_eq!(listed.len(), 3);
        created.reverse();
        assert_eq!(listed.iter().map(|o| o.id).collect::<Vec<_>>(), created);
        assert_eq!(listed[0].order_items[0].course.id, python.id);
        assert_eq!(listed[2].order_items[0].course.id, web.id);
    }
}
