use actix_web::{HttpRequest, web};

use crate::errors::AppError;

/// Shared secret guarding the admin surface, held in app data.
#[derive(Clone)]
pub struct AdminKey(pub String);

/// Check the X-Admin-Key header against the configured key.
///
/// Call at the top of every admin handler. An empty configured key rejects
/// everything (no key configured means no admin surface).
pub fn require_admin(req: &HttpRequest) -> Result<(), AppError> {
    let expected = req
        .app_data::<web::Data<AdminKey>>()
        .map(|key| key.0.as_str())
        .unwrap_or("");

    let provided = req
        .headers()
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if expected.is_empty() || !constant_time_eq(expected, provided) {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
