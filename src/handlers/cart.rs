use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use crate::error::AppResult;
use crate::handlers::current_user;
use crate::models::*;
use crate::services::{AuthService, CartService};

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cart items", body = [CartItemResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_cart(
    auth_service: web::Data<AuthService>,
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<Vec<CartItemResponse>> = async {
        let user = current_user(&req, &auth_service).await?;
        cart_service.list(user.id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart",
    tag = "cart",
    request_body = AddToCartRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Course added to cart", body = CartItemResponse),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course already in cart")
    )
)]
pub async fn add_to_cart(
    auth_service: web::Data<AuthService>,
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    let result: AppResult<CartItemResponse> = async {
        let user = current_user(&req, &auth_service).await?;
        cart_service.add(user.id, request.course_id).await
    }
    .await;

    match result {
        Ok(item) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            item,
            "Course added to cart".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/{cart_item_id}",
    tag = "cart",
    params(
        ("cart_item_id" = i32, Path, description = "Cart item id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Course removed from cart"),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn remove_from_cart(
    auth_service: web::Data<AuthService>,
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let result: AppResult<bool> = async {
        let user = current_user(&req, &auth_service).await?;
        cart_service.remove(user.id, path.into_inner()).await
    }
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::message("Course removed from cart"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("", web::post().to(add_to_cart))
            .route("/{cart_item_id}", web::delete().to(remove_from_cart)),
    );
}
