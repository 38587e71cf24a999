use crate::entities::course_entity as courses;
use crate::error::{AppError, AppResult};
use crate::models::CourseResponse;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 上架课程列表，按 id 排序；offset 超出范围时返回空列表
    pub async fn list_active(&self, offset: u64, limit: u64) -> AppResult<Vec<CourseResponse>> {
        let list = courses::Entity::find()
            .filter(courses::Column::IsActive.eq(true))
            .order_by_asc(courses::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, course_id: i32) -> AppResult<CourseResponse> {
        let course = Self::find_active(&self.pool, course_id).await?;
        Ok(course.into())
    }

    /// 读取上架课程，不存在或已下架均视为 NotFound
    pub(crate) async fn find_active<C: ConnectionTrait>(
        conn: &C,
        course_id: i32,
    ) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(course_id)
            .filter(courses::Column::IsActive.eq(true))
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }
}
