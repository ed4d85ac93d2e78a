//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Create a progress submission body with `completed` sent as 0|1.
pub fn progress_request(
    user_id: i64,
    activity_type: &str,
    level: i32,
    score: i32,
    completed: bool,
    lang: &str,
) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "activity_type": activity_type,
        "level": level,
        "score": score,
        "completed": if completed { 1 } else { 0 },
        "lang": lang,
    })
}

/// Create a sync-user request body.
pub fn sync_user_request(email: Option<&str>) -> serde_json::Value {
    match email {
        Some(e) => json!({ "email": e }),
        None => json!({}),
    }
}

/// Generate a unique email to avoid collisions between tests.
pub fn unique_email() -> String {
    format!("learner_{}@example.com", &Uuid::new_v4().simple().to_string()[..8])
}

/// Generate a unique language code so seeded content stays isolated.
pub fn unique_lang(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}
