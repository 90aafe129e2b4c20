use crate::handlers::{self, CreateDeckQuery, DrawQuery};
use crate::middleware::with_request_logging;
use crate::store::DeckStore;
use croupier_engine::factory::DeckFactory;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::Filter;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Loopback with an OS-assigned port.
    pub fn for_tests() -> Self {
        Self::new(DEFAULT_HOST, 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn bind_addr(&self) -> Result<SocketAddr, ServerError> {
        if let Ok(addr) = self.host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = self.host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        let candidate = format!("{}:{}", self.host, self.port);
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }
}

/// Shared state handed to every route.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    decks: Arc<DeckStore>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_factory(config, DeckFactory::default())
    }

    pub fn with_factory(config: ServerConfig, factory: DeckFactory) -> Self {
        Self {
            config,
            decks: Arc::new(DeckStore::with_factory(factory)),
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn decks(&self) -> Arc<DeckStore> {
        Arc::clone(&self.decks)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = context.config().bind_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = with_request_logging(Self::routes(&context));
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(address = %addr, "web server listening");

        let task = tokio::spawn(server_future);

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(io_err) = err
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return ServerError::BindError(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        ServerError::ConfigError(err.to_string())
    }

    /// Every route of the API, without request logging.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        Self::health_route(context)
            .or(Self::deck_routes(context))
            .unify()
            .boxed()
    }

    fn health_route(context: &AppContext) -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .and(Self::with_deck_store(context.decks()))
            .map(|decks: Arc<DeckStore>| handlers::health(&decks).into_response())
            .boxed()
    }

    fn deck_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let decks = context.decks();

        let create = warp::path!("decks")
            .and(warp::post())
            .and(Self::with_deck_store(decks.clone()))
            .and(warp::query::<CreateDeckQuery>())
            .and(warp::body::bytes())
            .and_then(
                |decks: Arc<DeckStore>, query: CreateDeckQuery, body: Bytes| async move {
                    let response = handlers::create_deck(decks, query, &body).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let open = warp::path!("decks" / String)
            .and(warp::get())
            .and(Self::with_deck_store(decks.clone()))
            .and_then(|deck_id: String, decks: Arc<DeckStore>| async move {
                let response = handlers::open_deck(decks, deck_id).await;
                Ok::<_, Infallible>(response)
            });

        let draw = warp::path!("decks" / String / "cards" / "draw")
            .and(warp::post())
            .and(Self::with_deck_store(decks.clone()))
            .and(warp::query::<DrawQuery>())
            .and_then(
                |deck_id: String, decks: Arc<DeckStore>, query: DrawQuery| async move {
                    let response = handlers::draw_cards(decks, deck_id, query).await;
                    Ok::<_, Infallible>(response)
                },
            );

        let shuffle = warp::path!("decks" / String / "shuffle")
            .and(warp::post())
            .and(Self::with_deck_store(decks.clone()))
            .and_then(|deck_id: String, decks: Arc<DeckStore>| async move {
                let response = handlers::shuffle_deck(decks, deck_id).await;
                Ok::<_, Infallible>(response)
            });

        let delete = warp::path!("decks" / String)
            .and(warp::delete())
            .and(Self::with_deck_store(decks))
            .and_then(|deck_id: String, decks: Arc<DeckStore>| async move {
                let response = handlers::delete_deck(decks, deck_id).await;
                Ok::<_, Infallible>(response)
            });

        create
            .or(draw)
            .unify()
            .or(shuffle)
            .unify()
            .or(open)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    fn with_deck_store(
        decks: Arc<DeckStore>,
    ) -> impl Filter<Extract = (Arc<DeckStore>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&decks))
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.await
                .map_err(|err| ServerError::ConfigError(format!("server task join error: {err}")))?;
        }

        tracing::info!(address = %self.addr, "web server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;

    async fn create(routes: &BoxedFilter<(Response,)>, query: &str, body: &str) -> serde_json::Value {
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/decks{query}"))
            .body(body.to_string())
            .reply(routes)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "{:?}", response.body());
        serde_json::from_slice(response.body()).expect("creation json")
    }

    #[test]
    fn bind_addr_resolves_ip_and_port() {
        let addr = ServerConfig::new("127.0.0.1", 9000).bind_addr().unwrap();
        assert_eq!(addr, "127.0.0.1:9000".parse().unwrap());

        let explicit = ServerConfig::new("127.0.0.1:7000", 9000).bind_addr().unwrap();
        assert_eq!(explicit.port(), 7000);
    }

    #[tokio::test]
    async fn health_reports_deck_count() {
        let context = AppContext::new_for_tests();
        let routes = WebServer::routes(&context);
        create(&routes, "", "").await;

        let response = warp::test::request().path("/health").reply(&routes).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["decks"], 1);
    }

    #[tokio::test]
    async fn create_open_draw_shuffle_delete() {
        let context = AppContext::new_for_tests();
        let routes = WebServer::routes(&context);

        let created = create(&routes, "?cards=AS,2S,3S", r#"{"type":0,"shuffled":false}"#).await;
        assert_eq!(created["remaining"], 3);
        assert_eq!(created["shuffled"], false);
        assert!(created.get("cards").is_none());
        let id = created["deck_id"].as_str().expect("deck id").to_string();

        let opened = warp::test::request()
            .path(&format!("/decks/{id}"))
            .reply(&routes)
            .await;
        assert_eq!(opened.status(), StatusCode::OK);
        let deck: serde_json::Value = serde_json::from_slice(opened.body()).unwrap();
        assert_eq!(deck["deck_id"], id);
        assert_eq!(deck["cards"][0]["code"], "AS");
        assert_eq!(deck["cards"][0]["value"], "ACE");
        assert_eq!(deck["cards"][0]["suit"], "SPADES");

        let drawn = warp::test::request()
            .method("POST")
            .path(&format!("/decks/{id}/cards/draw?count=1"))
            .reply(&routes)
            .await;
        assert_eq!(drawn.status(), StatusCode::OK);
        let drawn: serde_json::Value = serde_json::from_slice(drawn.body()).unwrap();
        assert_eq!(drawn["cards"].as_array().unwrap().len(), 1);
        assert_eq!(drawn["cards"][0]["code"], "AS");

        let shuffled = warp::test::request()
            .method("POST")
            .path(&format!("/decks/{id}/shuffle"))
            .reply(&routes)
            .await;
        let shuffled: serde_json::Value = serde_json::from_slice(shuffled.body()).unwrap();
        assert_eq!(shuffled["shuffled"], true);
        assert_eq!(shuffled["remaining"], 2);

        let deleted = warp::test::request()
            .method("DELETE")
            .path(&format!("/decks/{id}"))
            .reply(&routes)
            .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert!(context.decks().active_decks().is_empty());
    }

    #[tokio::test]
    async fn creation_errors_are_told_apart() {
        let routes = WebServer::routes(&AppContext::new_for_tests());

        let cases = [
            ("", "invalid body", StatusCode::BAD_REQUEST, "invalid_request_body"),
            ("?cards=AS,X", "", StatusCode::BAD_REQUEST, "unknown_card_code"),
            ("", r#"{"type":99999}"#, StatusCode::UNPROCESSABLE_ENTITY, "unsupported_card_type"),
            ("", r#"{"type":-1}"#, StatusCode::UNPROCESSABLE_ENTITY, "unsupported_card_type"),
            ("", r#"{"type":4294967296}"#, StatusCode::UNPROCESSABLE_ENTITY, "unsupported_card_type"),
            ("", r#"{"type":"French"}"#, StatusCode::BAD_REQUEST, "invalid_request_body"),
        ];
        for (query, body, status, code) in cases {
            let response = warp::test::request()
                .method("POST")
                .path(&format!("/decks{query}"))
                .body(body)
                .reply(&routes)
                .await;
            assert_eq!(response.status(), status, "{query} {body}");
            let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
            assert_eq!(error["error"], code);
        }
    }

    #[tokio::test]
    async fn draw_requires_a_numeric_count() {
        let context = AppContext::new_for_tests();
        let routes = WebServer::routes(&context);
        let created = create(&routes, "", "").await;
        let id = created["deck_id"].as_str().unwrap().to_string();

        for path in [
            format!("/decks/{id}/cards/draw"),
            format!("/decks/{id}/cards/draw?count=many"),
            format!("/decks/{id}/cards/draw?count=%203"),
        ] {
            let response = warp::test::request()
                .method("POST")
                .path(&path)
                .reply(&routes)
                .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        }

        let missing = warp::test::request()
            .method("POST")
            .path("/decks/not-a-deck/cards/draw?count=1")
            .reply(&routes)
            .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
