use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// 访问日志
pub async fn access_log<B>(req: Request<B>, next: Next<B>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} -> {} ({:?})",
        method,
        path,
        response.status().as_u16(),
        start.elapsed()
    );

    response
}
