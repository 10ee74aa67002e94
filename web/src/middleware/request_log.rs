use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::*;

/// Request-observation middleware: one log record per request/response pair.
///
/// This layer is added LAST in the router build, which makes it the
/// outermost one. That position is load-bearing: the status it records is
/// the final status the client sees, with auth rejections and error
/// translation already applied by the inner layers. The record goes through
/// the `log` facade, so emitting it can never fail the request, and no
/// cross-request state is held.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    response
}
