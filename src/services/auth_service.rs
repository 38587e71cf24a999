use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        // 验证输入参数
        let name = request.name.trim().to_string();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(AppError::ValidationError(
                "Name must be between 1 and 100 characters".to_string(),
            ));
        }
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_password(&request.password)?;

        // 检查邮箱是否已注册
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::ValidationError("Email already registered".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        log::info!("User {} registered", user.id);
        Ok(user.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Incorrect email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Incorrect email or password".to_string(),
            ));
        }
        if !user.is_active {
            return Err(AppError::AuthError("User is inactive".to_string()));
        }

        self.issue_tokens(user)
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user = self.resolve_user(claims.user_id()?).await?;
        self.issue_tokens(user)
    }

    /// 根据令牌中的用户ID加载用户；用户不存在 -> NotFound，已停用 -> AuthError
    pub async fn resolve_user(&self, user_id: i32) -> AppResult<users::Model> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if !user.is_active {
            return Err(AppError::AuthError("User is inactive".to_string()));
        }
        Ok(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(user.id, &user.email)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, &user.email)?;

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_test_pool;

    async fn service() -> AuthService {
        let pool = create_test_pool().await;
        AuthService::new(pool, JwtService::new("test-secret", 60, 600))
    }

    fn register_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ivan".to_string(),
            email: email.to_string(),
            password: "Password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let auth = service().await;
        let user = auth
            .register(register_request("Ivan@Example.com"))
            .await
            .unwrap();
        assert_eq!(user.email, "ivan@example.com");
        assert!(user.is_active);

        let response = auth
            .login(LoginRequest {
                email: "ivan@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.id, user.id);
        assert_eq!(response.token_type, "bearer");

        let refreshed = auth.refresh_token(&response.refresh_token).await.unwrap();
        assert_eq!(refreshed.user.id, user.id);
        assert!(auth.refresh_token(&response.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let auth = service().await;
        auth.register(register_request("a@example.com"))
            .await
            .unwrap();
        assert!(matches!(
            auth.register(register_request("A@example.com")).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let auth = service().await;
        assert!(auth.register(register_request("not-an-email")).await.is_err());

        let mut weak = register_request("b@example.com");
        weak.password = "short".to_string();
        assert!(auth.register(weak).await.is_err());

        let mut blank = register_request("c@example.com");
        blank.name = "   ".to_string();
        assert!(auth.register(blank).await.is_err());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = service().await;
        auth.register(register_request("a@example.com"))
            .await
            .unwrap();
        assert!(matches!(
            auth.login(LoginRequest {
                email: "a@example.com".to_string(),
                password: "Password999".to_string(),
            })
            .await,
            Err(AppError::AuthError(_))
        ));
        assert!(matches!(
            auth.login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await,
            Err(AppError::AuthError(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let auth = service().await;
        let user = auth
            .register(register_request("a@example.com"))
            .await
            .unwrap();
        assert_eq!(auth.resolve_user(user.id).await.unwrap().id, user.id);
        assert!(matches!(
            auth.resolve_user(user.id + 100).await,
            Err(AppError::NotFound(_))
        ));
    }
}
