use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use crate::error::AppResult;
use crate::handlers::current_user;
use crate::models::*;
use crate::services::{AuthService, CheckoutService, OrderService};

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order created from cart", body = OrderResponse),
        (status = 400, description = "Cart is empty"),
        (status = 409, description = "A course in the cart is no longer available")
    )
)]
pub async fn create_order(
    auth_service: web::Data<AuthService>,
    checkout_service: web::Data<CheckoutService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<OrderResponse> = async {
        let user = current_user(&req, &auth_service).await?;
        checkout_service.checkout(user.id).await
    }
    .await;

    match result {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Orders, newest first", body = [OrderResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_orders(
    auth_service: web::Data<AuthService>,
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<Vec<OrderResponse>> = async {
        let user = current_user(&req, &auth_service).await?;
        order_service.list_for_user(user.id).await
    }
    .await;

    match result {
        Ok(orders) => Ok(HttpResponse::Ok().json(ApiResponse::success(orders))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(get_orders)),
    );
}
