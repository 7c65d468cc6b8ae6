use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::services::activities_service::{self, ActivityView};
use crate::services::signup_request::SignupRequest;
use crate::web::api_error::ApiError;

pub async fn list_activities_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ActivityView>>, ApiError> {
    let activities = activities_service::list_activities(&pool).await?;
    Ok(Json(activities))
}

#[derive(Debug, Deserialize)]
pub struct SignupParams {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub activity: ActivityView,
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(params): Query<SignupParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<SignupResponse>, ApiError> {
    let request = SignupRequest::new(&activity_name, &params.email)?;
    let activity = activities_service::signup_for_activity(&pool, &request).await?;

    Ok(Json(SignupResponse {
        message: format!("Signed up {} for {}", request.email(), activity.name),
        activity,
    }))
}
