//! Review Routes
//!
//! - POST /api/v1/reviews - Validate a review payload

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::api::dto::ReviewRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::review::ReviewSubmission;

/// POST /api/v1/reviews
///
/// Echoes the validated payload; storing it is the backend's job. Bodies
/// that are not a JSON object of the right shape are validation errors too.
pub async fn submit_review(
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Json<ReviewSubmission>> {
    let Json(req) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let submission = ReviewSubmission::new(req.star_rating(), req.comment)?;

    tracing::info!(rating = submission.rating, "Review accepted");
    Ok(Json(submission))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> ReviewRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_star_rating_accepts_whole_numbers_only() {
        assert_eq!(request(r#"{"rating": 4}"#).star_rating(), 4);
        assert_eq!(request(r#"{"rating": 4.5}"#).star_rating(), 0);
        assert_eq!(request(r#"{"rating": "5"}"#).star_rating(), 0);
        assert_eq!(request(r#"{"rating": -1}"#).star_rating(), 0);
        assert_eq!(request(r#"{"rating": 300}"#).star_rating(), 0);
        assert_eq!(request(r#"{"comment": "x"}"#).star_rating(), 0);
    }
}
