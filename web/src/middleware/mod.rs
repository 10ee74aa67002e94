pub(crate) mod auth;
pub(crate) mod request_log;
