//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use umbra_bridge::BridgeRelay;
use umbra_governance::{GovernanceEngine, TallyCipher};
use umbra_store::DaoStore;
use umbra_types::Clock;
use umbra_wallet_core::BalanceLedger;

/// The services every handler reaches through `State<Arc<ApiState>>`.
pub struct ApiState {
    pub governance: GovernanceEngine,
    pub bridge: Arc<BridgeRelay>,
    pub wallet: BalanceLedger,
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    /// Wire all services over one store and one clock.
    pub fn new(
        store: Arc<dyn DaoStore>,
        cipher: Arc<dyn TallyCipher>,
        clock: Arc<dyn Clock>,
        settlement_delay: Duration,
    ) -> Self {
        Self {
            governance: GovernanceEngine::new(store.clone(), cipher, clock.clone()),
            bridge: Arc::new(BridgeRelay::new(store.clone(), clock.clone(), settlement_delay)),
            wallet: BalanceLedger::new(store, clock.clone()),
            clock,
        }
    }
}
