use crate::controller::ApiResponse;
use crate::extractors::AuthenticatedUser;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::*;
use serde_json::json;

/// GET the identity asserted by the presented auth token.
///
/// The response simply echoes what verification established: the principal's
/// username and role labels. Clients use this to bootstrap their UI state
/// after login.
#[utoipa::path(
    get,
    path = "/user_session",
    responses(
        (status = 200, description = "Returns the authenticated principal and its roles"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(AuthenticatedUser(principal): AuthenticatedUser) -> impl IntoResponse {
    debug!("GET user session for {}", principal.username);

    let session_json = json!({
        "username": principal.username,
        "roles": principal.roles,
    });

    Json(ApiResponse::new(StatusCode::OK.into(), session_json))
}
