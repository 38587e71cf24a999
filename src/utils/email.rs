use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email regex is valid")
    })
}

/// 校验邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.len() > 255 || !email_regex().is_match(email) {
        return Err(AppError::ValidationError("Invalid email address".to_string()));
    }
    Ok(())
}

/// 邮箱统一去空格并转小写后存储与比较
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
