use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::prometheus::{LATENCY, REQUESTS_TOTAL};

pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let response = next.run(req).await;

    REQUESTS_TOTAL
        .with_label_values(&[response.status().as_str()])
        .inc();
    LATENCY.observe(start.elapsed().as_secs_f64());

    response
}
