//! Router assembly and the HTTP listener.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::error::RpcError;
use crate::handlers;
use crate::state::ApiState;

/// Every API route, without middleware.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/api/proposals",
            get(handlers::list_proposals).post(handlers::create_proposal),
        )
        .route("/api/proposals/:id", get(handlers::get_proposal))
        .route("/api/vote", post(handlers::cast_vote))
        .route("/api/votes/:proposal_id", get(handlers::list_votes))
        .route(
            "/api/bridge/transactions",
            get(handlers::list_bridge_transactions),
        )
        .route(
            "/api/bridge/transactions/:id",
            get(handlers::get_bridge_transaction),
        )
        .route("/api/bridge", post(handlers::create_bridge_transaction))
        .route(
            "/api/wallet/balance",
            get(handlers::get_balance_named_wallet).post(handlers::update_wallet_balance),
        )
        .route("/api/wallet/:address", get(handlers::get_wallet_balance))
        .route("/api/chains", get(handlers::list_chains))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

/// CORS for the browser client. An empty origin list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub struct RpcServer {
    pub addr: SocketAddr,
    allowed_origins: Vec<String>,
    state: Arc<ApiState>,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, state: Arc<ApiState>) -> Self {
        Self {
            addr,
            allowed_origins: Vec::new(),
            state,
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// The full application: routes plus CORS.
    pub fn app(&self) -> Router {
        router(self.state.clone()).layer(cors_layer(&self.allowed_origins))
    }

    pub async fn bind(&self) -> Result<TcpListener, RpcError> {
        TcpListener::bind(self.addr)
            .await
            .map_err(|source| RpcError::Bind {
                addr: self.addr,
                source,
            })
    }

    /// Serve on `listener` until `shutdown` resolves. In-flight requests
    /// are allowed to finish.
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "API server listening");
        }
        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("API server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use umbra_governance::MockCipher;
    use umbra_nullables::NullClock;
    use umbra_store::MemStore;

    fn state() -> Arc<ApiState> {
        Arc::new(ApiState::new(
            Arc::new(MemStore::new()),
            Arc::new(MockCipher),
            Arc::new(NullClock::at_millis(0)),
            Duration::from_secs(2),
        ))
    }

    #[tokio::test]
    async fn serves_until_shutdown() {
        let server = RpcServer::new(([127, 0, 0, 1], 0).into(), state());
        let listener = server.bind().await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async move {
                    let _ = rx.await;
                })
                .await
        });
        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn bind_failure_names_the_address() {
        let first = RpcServer::new(([127, 0, 0, 1], 0).into(), state());
        let listener = first.bind().await.unwrap();
        let taken = listener.local_addr().unwrap();

        let second = RpcServer::new(taken, state());
        match second.bind().await {
            Err(RpcError::Bind { addr, .. }) => assert_eq!(addr, taken),
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
