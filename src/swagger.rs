use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::OrderStatus;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::me,
        handlers::user::delete_me,
        handlers::course::list_courses,
        handlers::course::get_course,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::remove_from_cart,
        handlers::order::create_order,
        handlers::order::get_orders,
    ),
    components(
        schemas(
            CreateUserRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            CourseResponse,
            CourseQuery,
            AddToCartRequest,
            CartItemResponse,
            OrderItemResponse,
            OrderResponse,
            OrderStatus,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "user", description = "User account API"),
        (name = "course", description = "Course catalog API"),
        (name = "cart", description = "Shopping cart API"),
        (name = "order", description = "Checkout and order history API"),
    ),
    info(
        title = "Course Shop API",
        version = "1.0.0",
        description = "Online course store REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_checkout_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/orders"));
        assert!(doc.paths.paths.contains_key("/cart/{cart_item_id}"));
        assert!(doc.paths.paths.contains_key("/courses"));
    }
}
