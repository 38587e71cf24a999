use crate::config::CorsConfig;
use actix_cors::Cors;

pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allowed_origins.is_empty() {
        // 未配置来源时放开（本地开发）
        Cors::default().allowed_origin_fn(|_, _req_head| true)
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
