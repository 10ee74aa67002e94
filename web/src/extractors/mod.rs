pub(crate) mod authenticated_user;

pub(crate) use authenticated_user::AuthenticatedUser;

pub(crate) type RejectionType = (axum::http::StatusCode, String);
