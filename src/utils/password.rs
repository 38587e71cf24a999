use bcrypt::{DEFAULT_COST, hash, verify};
use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// 注册时的密码规则: 8-128 个字符，同时包含大写、小写字母和数字
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::ValidationError(format!(
            "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }

    let (mut lower, mut upper, mut digit) = (false, false, false);
    for c in password.chars() {
        lower |= c.is_lowercase();
        upper |= c.is_uppercase();
        digit |= c.is_ascii_digit();
    }

    if lower && upper && digit {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "Password must contain upper and lower case letters and a digit".to_string(),
        ))
    }
}

/// 对密码进行哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}
