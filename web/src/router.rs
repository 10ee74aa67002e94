use crate::{
    controller::{health_check_controller, user_session_controller},
    middleware::{auth::require_auth, request_log::log_request},
    AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "BeerBrawl Tournament API"
        ),
        paths(
            health_check_controller::health_check,
            user_session_controller::read,
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "beerbrawl", description = "BeerBrawl Tournament Platform API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our bearer token based authentication requirement for gaining
// access to our API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_session_routes(app_state.clone()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors_layer(&app_state))
        // Added last on purpose: the request log layer must be outermost so
        // the status it records is the final one the client sees, auth
        // rejections and error translation included.
        .layer(from_fn(log_request))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn user_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/user_session", get(user_session_controller::read))
        .route_layer(from_fn_with_state(app_state, require_auth))
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use domain::jwt::Tokenizer;
    use service::config::Config;
    use tower::ServiceExt;

    fn test_app_state() -> AppState {
        let config = Config::default().set_jwt_secret("x".repeat(64));
        let tokenizer = Tokenizer::new(&config).unwrap();
        AppState::new(config, tokenizer)
    }

    #[tokio::test]
    async fn test_health_check_is_public() {
        let app = define_routes(test_app_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_session_requires_a_token() {
        let app = define_routes(test_app_state());

        let request = Request::builder()
            .uri("/user_session")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_issued_token_grants_access_to_user_session() {
        let app_state = test_app_state();
        let app = define_routes(app_state.clone());

        let token = app_state
            .tokenizer()
            .issue("alice", &["ADMIN".to_string()])
            .unwrap();

        let request = Request::builder()
            .uri("/user_session")
            .header("authorization", token)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["username"], "alice");
        assert_eq!(json["data"]["roles"][0], "ADMIN");
    }
}
