//! 测试用数据构造

use crate::entities::{course_entity as courses, user_entity as users};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

pub async fn seed_user(pool: &DatabaseConnection, email: &str) -> users::Model {
    users::ActiveModel {
        name: Set(email.split('@').next().unwrap_or("user").to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert user")
}

pub async fn seed_course(pool: &DatabaseConnection, title: &str, price: Decimal) -> courses::Model {
    courses::ActiveModel {
        title: Set(title.to_string()),
        description: Set(Some(format!("{title} course"))),
        price: Set(price),
        instructor: Set(None),
        duration: Set(Some("8 weeks".to_string())),
        level: Set(Some("Beginner".to_string())),
        image_url: Set(None),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert course")
}

async fn update_course(
    pool: &DatabaseConnection,
    course_id: i32,
    change: impl FnOnce(&mut courses::ActiveModel),
) {
    let mut am = courses::Entity::find_by_id(course_id)
        .one(pool)
        .await
        .expect("query course")
        .expect("course exists")
        .into_active_model();
    change(&mut am);
    am.update(pool).await.expect("update course");
}

pub async fn deactivate_course(pool: &DatabaseConnection, course_id: i32) {
    update_course(pool, course_id, |am| am.is_active = Set(false)).await;
}

pub async fn set_course_price(pool: &DatabaseConnection, course_id: i32, price: Decimal) {
    update_course(pool, course_id, |am| am.price = Set(price)).await;
}
