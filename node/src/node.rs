//! The Umbra service node: wires store, engines and API server together and
//! owns their lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use umbra_governance::{MockCipher, TallyCipher};
use umbra_rpc::{ApiState, RpcServer};
use umbra_store::{DaoStore, MemStore};
use umbra_types::{Clock, SystemClock};

use crate::config::NodeConfig;
use crate::shutdown::ShutdownController;
use crate::NodeError;

/// How long in-flight requests get to finish once shutdown starts.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DaoNode {
    config: NodeConfig,
    addr: SocketAddr,
    state: Arc<ApiState>,
    shutdown: Arc<ShutdownController>,
}

impl DaoNode {
    /// A node over a fresh in-memory store and the system clock.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        Self::with_services(config, Arc::new(MemStore::new()), Arc::new(SystemClock))
    }

    /// A node over caller-supplied services.
    pub fn with_services(
        config: NodeConfig,
        store: Arc<dyn DaoStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        let addr = config.socket_addr()?;
        let cipher: Arc<dyn TallyCipher> = Arc::new(MockCipher);
        debug!(cipher = cipher.name(), "tally cipher selected");
        let state = Arc::new(ApiState::new(store, cipher, clock, config.settlement_delay()));
        Ok(Self {
            config,
            addr,
            state,
            shutdown: Arc::new(ShutdownController::new()),
        })
    }

    pub fn state(&self) -> Arc<ApiState> {
        self.state.clone()
    }

    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        self.shutdown.clone()
    }

    /// Bind the API server and start serving in the background.
    pub async fn start(&self) -> Result<RunningNode, NodeError> {
        let server = RpcServer::new(self.addr, self.state.clone())
            .with_allowed_origins(self.config.allowed_origins.clone());
        let listener = server.bind().await?;
        let local_addr = listener.local_addr()?;

        let stopped = self.shutdown.signalled();
        let state = self.state.clone();
        let task = tokio::spawn(async move {
            let served = server.serve(listener, stopped).await;
            let cancelled = state.bridge.cancel_all();
            info!(cancelled, "pending settlements dropped");
            served.map_err(NodeError::from)
        });

        info!(
            %local_addr,
            settlement_delay_ms = self.config.settlement_delay_ms,
            "Umbra node started"
        );
        Ok(RunningNode {
            local_addr,
            shutdown: self.shutdown.clone(),
            task,
        })
    }
}

/// Handle to a started node.
pub struct RunningNode {
    local_addr: SocketAddr,
    shutdown: Arc<ShutdownController>,
    task: JoinHandle<Result<(), NodeError>>,
}

impl RunningNode {
    /// The bound address. Differs from the configured one when port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait for the server to exit on its own (after a shutdown signal).
    pub async fn wait(self) -> Result<(), NodeError> {
        join(self.task).await
    }

    /// Trigger shutdown and wait for the server to drain.
    pub async fn stop(self) -> Result<(), NodeError> {
        info!("Umbra node stopping");
        self.shutdown.shutdown();

        let abort = self.task.abort_handle();
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, join(self.task)).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                    "server did not drain in time, aborting"
                );
                abort.abort();
                Err(NodeError::ShutdownTimeout)
            }
        }
    }
}

async fn join(task: JoinHandle<Result<(), NodeError>>) -> Result<(), NodeError> {
    task.await.map_err(|e| NodeError::Task(e.to_string()))?
}
