use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// The single translation point between the domain error taxonomy and HTTP.
// Every kind maps to exactly one status/payload; nothing downstream of here
// inspects message text to dispatch.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::NotFound(message) => {
                let message = message.unwrap_or_else(|| "not found".to_string());
                warn!("{message}");
                (StatusCode::NOT_FOUND, message).into_response()
            }
            DomainErrorKind::PreconditionFailed(message) => (
                StatusCode::BAD_REQUEST,
                format!("A precondition wasn't met: {message}"),
            )
                .into_response(),
            DomainErrorKind::TournamentAlreadyStarted(message) => {
                debug!("{}", message.as_deref().unwrap_or("tournament already started"));
                (StatusCode::CONFLICT, "Tournament already started").into_response()
            }
            DomainErrorKind::AlreadyExists(message) => {
                debug!("{message}");
                (StatusCode::CONFLICT, message).into_response()
            }
            DomainErrorKind::DrinksAlreadyPickedUp { match_id, team_id } => (
                StatusCode::CONFLICT,
                format!("Team {team_id} has already picked up its drinks for match {match_id}!"),
            )
                .into_response(),
            DomainErrorKind::BadPublicAccessToken => (
                StatusCode::UNAUTHORIZED,
                "public access token missing or incorrect",
            )
                .into_response(),
            // One opaque message for every authentication failure: expired,
            // tampered and malformed tokens must be indistinguishable here.
            DomainErrorKind::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            DomainErrorKind::Internal(internal_error_kind) => {
                match internal_error_kind {
                    InternalErrorKind::Config(message) | InternalErrorKind::Other(message) => {
                        error!("{message}")
                    }
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
