use actix_web::{HttpResponse, ResponseError, Result, web};
use crate::models::*;
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/courses",
    tag = "course",
    params(CourseQuery),
    responses(
        (status = 200, description = "Active courses", body = [CourseResponse])
    )
)]
pub async fn list_courses(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<CourseQuery>,
) -> Result<HttpResponse> {
    match catalog_service
        .list_active(query.get_offset(), query.get_limit())
        .await
    {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(courses))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    tag = "course",
    params(
        ("course_id" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match catalog_service.get_by_id(path.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn course_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("", web::get().to(list_courses))
            .route("/{course_id}", web::get().to(get_course)),
    );
}
