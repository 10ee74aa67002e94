use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};

use crate::extractors::RejectionType;
use domain::jwt::AuthenticatedPrincipal;

/// Hands the principal verified by the `require_auth` middleware to a
/// handler. Rejects with 401 if the route was somehow reached without the
/// middleware having stored one.
pub(crate) struct AuthenticatedUser(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedPrincipal>() {
            Some(principal) => Ok(AuthenticatedUser(principal.clone())),
            None => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        }
    }
}
