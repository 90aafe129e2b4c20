use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

/// What is known about a request before it reaches a handler.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub path: String,
    started: Instant,
}

impl RequestInfo {
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

/// Wraps `filter` so every request is logged on arrival and on completion,
/// with the response status and duration.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::debug!(method = %method, path = %path.as_str(), "incoming request");
            RequestInfo {
                method,
                path: path.as_str().to_string(),
                started: Instant::now(),
            }
        })
        .and(filter)
        .map(|info: RequestInfo, reply: T| {
            let response = reply.into_response();
            log_response(response.status(), &info);
            response
        })
}

/// Logs a completed request at a level matching its status class.
pub fn log_response(status: StatusCode, info: &RequestInfo) {
    let duration_ms = info.elapsed_ms();
    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            method = %info.method,
            path = %info.path,
            duration_ms,
            "server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            status = status.as_u16(),
            method = %info.method,
            path = %info.path,
            duration_ms,
            "client error"
        );
    } else {
        tracing::info!(
            status = status.as_u16(),
            method = %info.method,
            path = %info.path,
            duration_ms,
            "response sent"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[tokio::test]
    async fn logs_status_of_wrapped_routes() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer());
        let _guard = tracing::subscriber::set_default(registry);

        let route = with_request_logging(
            warp::path("teapot")
                .map(|| warp::reply::with_status("short and stout", StatusCode::IM_A_TEAPOT)),
        );

        let response = warp::test::request()
            .method("GET")
            .path("/teapot")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

        let entries = subscriber.entries();
        let completed = entries
            .iter()
            .find(|entry| entry.message.contains("client error"))
            .expect("completion entry");
        assert_eq!(completed.level, Level::WARN);
        assert!(completed
            .fields
            .iter()
            .any(|(k, v)| k == "path" && v.contains("/teapot")));
    }
}
