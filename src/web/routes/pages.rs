use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::services::activities_service::{self, ActivityView};
use crate::services::signup_request::SignupRequest;

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesPageTemplate {
    pub activities: Vec<ActivityView>,
    pub has_notice: bool,
    pub notice_is_error: bool,
    pub notice_message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ActivitiesPageQuery {
    pub notice: Option<String>,
}

fn notice_text(code: &str) -> Option<(bool, &'static str)> {
    match code {
        "signup_ok" => Some((false, "You're signed up!")),
        "not_found" => Some((true, "That activity does not exist.")),
        "full" => Some((true, "Sorry, that activity is full.")),
        "already_enrolled" => Some((true, "You are already signed up for that activity.")),
        "invalid" => Some((true, "Please pick an activity and enter a valid email address.")),
        "error" => Some((true, "Something went wrong, please try again later.")),
        _ => None,
    }
}

pub async fn activities_page_handler(
    Query(query): Query<ActivitiesPageQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let activities = match activities_service::list_activities(&pool).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Activities page load failed: {}", e);
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let notice = query.notice.as_deref().and_then(notice_text);
    let template = ActivitiesPageTemplate {
        activities,
        has_notice: notice.is_some(),
        notice_is_error: notice.map(|(is_error, _)| is_error).unwrap_or(false),
        notice_message: notice.map(|(_, msg)| msg).unwrap_or_default().to_string(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "activities_page_render_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub activity: String,
    pub email: String,
}

pub async fn signup_form_handler(
    State(pool): State<SqlitePool>,
    Form(form): Form<SignupForm>,
) -> impl IntoResponse {
    let notice = match SignupRequest::new(&form.activity, &form.email) {
        Err(_) => "invalid",
        Ok(request) => match activities_service::signup_for_activity(&pool, &request).await {
            Ok(_) => "signup_ok",
            Err(e) => {
                warn!(outcome = e.code(), "Signup form failed: {}", e);
                e.code()
            }
        },
    };

    Redirect::to(&format!("/?notice={}", notice))
}
