use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use crate::error::AppResult;
use crate::handlers::current_user;
use crate::models::*;
use crate::services::{AuthService, UserService};

#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account and all its data deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_me(
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<()> = async {
        let user = current_user(&req, &auth_service).await?;
        user_service.delete_user(user.id).await
    }
    .await;

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/users").route("/me", web::delete().to(delete_me)));
}
