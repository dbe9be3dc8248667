//! Request logging middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    log::info!(">>> {} {}", method, uri);
    let response = next.run(request).await;

    let status = response.status();
    let elapsed = start.elapsed();
    if status.is_server_error() {
        log::error!("<<< {} {} {} ({:?})", method, uri, status.as_u16(), elapsed);
    } else {
        log::info!("<<< {} {} {} ({:?})", method, uri, status.as_u16(), elapsed);
    }
    response
}
