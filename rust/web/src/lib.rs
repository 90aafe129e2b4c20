pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod store;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, init_test_logging, LogEntry, LogFormat, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging, RequestInfo};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use store::{DeckId, DeckStore, StoreError};
