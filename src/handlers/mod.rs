pub mod auth;
pub mod cart;
pub mod course;
pub mod order;
pub mod user;

pub use auth::auth_config;
pub use cart::cart_config;
pub use course::course_config;
pub use order::order_config;
pub use user::user_config;

use crate::entities::user_entity;
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthenticatedUserId;
use crate::services::AuthService;
use actix_web::{HttpMessage, HttpRequest};

/// 从请求扩展取出认证用户ID并加载用户
pub(crate) async fn current_user(
    req: &HttpRequest,
    auth_service: &AuthService,
) -> AppResult<user_entity::Model> {
    let user_id = req
        .extensions()
        .get::<AuthenticatedUserId>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))?;
    auth_service.resolve_user(user_id.0).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_test_pool;
    use crate::middlewares::AuthMiddleware;
    use crate::services::*;
    use crate::test_support::{seed_course, seed_user};
    use crate::utils::JwtService;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use rust_decimal_macros::dec;
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};

    fn jwt() -> JwtService {
        JwtService::new("test-secret", 600, 3600)
    }

    macro_rules! init_app {
        ($pool:expr) => {{
            let pool: DatabaseConnection = $pool;
            test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new(jwt()))
                    .app_data(web::Data::new(AuthService::new(pool.clone(), jwt())))
                    .app_data(web::Data::new(UserService::new(pool.clone())))
                    .app_data(web::Data::new(CatalogService::new(pool.clone())))
                    .app_data(web::Data::new(CartService::new(pool.clone())))
                    .app_data(web::Data::new(OrderService::new(pool.clone())))
                    .app_data(web::Data::new(CheckoutService::new(pool.clone())))
                    .service(
                        web::scope("/api/v1")
                            .configure(auth_config)
                            .configure(user_config)
                            .configure(course_config)
                            .configure(cart_config)
                            .configure(order_config),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_cart_requires_token() {
        let app = init_app!(create_test_pool().await);

        let req = test::TestRequest::get().uri("/api/v1/cart").to_request();
        let err = test::try_call_service(&app, req)
            .await
            .err()
            .expect("middleware rejects request");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let pool = create_test_pool().await;
        let user = seed_user(&pool, "a@example.com").await;
        let refresh = jwt().generate_refresh_token(user.id, &user.email).unwrap();
        let app = init_app!(pool);

        let req = test::TestRequest::get()
            .uri("/api/v1/orders")
            .insert_header(("Authorization", format!("Bearer {refresh}")))
            .to_request();
        let err = test::try_call_service(&app, req)
            .await
            .err()
            .expect("middleware rejects request");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_courses_are_public() {
        let pool = create_test_pool().await;
        seed_course(&pool, "Web development", dec!(5000.0)).await;
        let app = init_app!(pool);

        let req = test::TestRequest::get().uri("/api/v1/courses").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_add_to_cart_then_checkout() {
        let pool = create_test_pool().await;
        let user = seed_user(&pool, "buyer@example.com").await;
        let web_course = seed_course(&pool, "Web development", dec!(5000.0)).await;
        let design = seed_course(&pool, "Design", dec!(4500.0)).await;
        let token = jwt()
            .generate_access_token(user.id, &user.email)
            .unwrap();
        let bearer = ("Authorization", format!("Bearer {token}"));
        let app = init_app!(pool);

        for course_id in [web_course.id, design.id] {
            let req = test::TestRequest::post()
                .uri("/api/v1/cart")
                .insert_header(bearer.clone())
                .set_json(json!({ "course_id": course_id }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri("/api/v1/cart")
            .insert_header(bearer.clone())
            .set_json(json!({ "course_id": design.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/v1/orders")
            .insert_header(bearer.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total_amount"].as_f64(), Some(9500.0));
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["order_items"].as_array().map(Vec::len), Some(2));

        let req = test::TestRequest::post()
            .uri("/api/v1/orders")
            .insert_header(bearer.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/v1/cart")
            .insert_header(bearer)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }
}
