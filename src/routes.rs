use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::fetcher::Fetcher;
use crate::forms::{ContactForm, JoinForm};
use crate::mailer::Mailer;

pub struct AppState {
    pub fetcher: Fetcher,
    pub mailer: Option<Mailer>,
}

// Route handlers

/// GET /api/articles - the aggregated, normalized feed as JSON.
pub async fn articles(State(state): State<Arc<AppState>>) -> Response {
    match state.fetcher.fetch_articles().await {
        Ok(articles) => Json(json!({ "articles": articles })).into_response(),
        Err(e) => {
            error!("Error fetching articles feed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch articles" })),
            )
                .into_response()
        }
    }
}

/// POST /api/contact - validate and relay a contact message.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Response {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(field) => return missing_field(field),
    };

    info!(
        "New contact form submission from {} <{}>: {}",
        submission.name, submission.email, submission.subject
    );

    if let Some(mailer) = &state.mailer {
        // A failed notification must not fail the submission
        if let Err(e) = mailer.send_contact(&submission).await {
            error!("Error sending contact notification email: {}", e);
        }
    } else {
        info!("Mailer not configured, skipping contact notification");
    }

    Json(json!({ "success": true, "message": "Message sent successfully" })).into_response()
}

/// POST /api/join - validate and relay a membership application.
pub async fn join(State(state): State<Arc<AppState>>, Json(form): Json<JoinForm>) -> Response {
    let application = match form.validate() {
        Ok(application) => application,
        Err(field) => return missing_field(field),
    };

    info!(
        "New join application from {} {} <{}>",
        application.first_name, application.last_name, application.email
    );

    if let Some(mailer) = &state.mailer {
        if let Err(e) = mailer.send_join(&application).await {
            error!("Error sending join notification email: {}", e);
        }
    } else {
        info!("Mailer not configured, skipping join notification");
    }

    Json(json!({ "success": true, "message": "Application submitted successfully" }))
        .into_response()
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

fn missing_field(field: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": format!("Missing required field: {}", field) })),
    )
        .into_response()
}
