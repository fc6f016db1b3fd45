//! Route handlers.
//!
//! Each handler validates, calls one service, and maps the outcome to a
//! status code. No handler touches the store directly.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use umbra_types::{
    BridgeTransaction, ChainId, ChainInfo, EntityId, Proposal, Timestamp, Vote, WalletAddress,
    WalletBalance,
};
use umbra_wallet_core::BalanceView;

use crate::error::ApiError;
use crate::state::ApiState;
use crate::validation::{
    self, BalanceRequest, BallotRequest, ProposalRequest, TransferRequest,
};

type ApiResult<T> = Result<T, ApiError>;
type Body<T> = Result<Json<T>, JsonRejection>;

// ── Proposals ────────────────────────────────────────────────────────────

pub async fn list_proposals(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<Proposal>>> {
    let proposals = state
        .governance
        .proposals()
        .map_err(|e| ApiError::from_governance(e, "fetch proposals"))?;
    Ok(Json(proposals))
}

pub async fn get_proposal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Proposal>> {
    state
        .governance
        .proposal(&EntityId::from(id))
        .map_err(|e| ApiError::from_governance(e, "fetch proposal"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Proposal"))
}

pub async fn create_proposal(
    State(state): State<Arc<ApiState>>,
    body: Body<ProposalRequest>,
) -> ApiResult<(StatusCode, Json<Proposal>)> {
    let body = validation::json_body(body, validation::PROPOSAL)?;
    let input = validation::proposal_request(body)?;
    let proposal = state
        .governance
        .create_proposal(input)
        .map_err(|e| ApiError::from_governance(e, "create proposal"))?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

// ── Votes ────────────────────────────────────────────────────────────────

pub async fn cast_vote(
    State(state): State<Arc<ApiState>>,
    body: Body<BallotRequest>,
) -> ApiResult<(StatusCode, Json<Vote>)> {
    let body = validation::json_body(body, validation::VOTE)?;
    let ballot = validation::ballot_request(body)?;
    let vote = state
        .governance
        .cast_vote(ballot)
        .map_err(|e| ApiError::from_governance(e, "cast vote"))?;
    Ok((StatusCode::CREATED, Json(vote)))
}

pub async fn list_votes(
    State(state): State<Arc<ApiState>>,
    Path(proposal_id): Path<String>,
) -> ApiResult<Json<Vec<Vote>>> {
    state
        .governance
        .votes(&EntityId::from(proposal_id))
        .map_err(|e| ApiError::from_governance(e, "fetch votes"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Proposal"))
}

// ── Bridge ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub address: Option<String>,
}

pub async fn list_bridge_transactions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<Vec<BridgeTransaction>>> {
    // An empty `address=` means no filter.
    let involving = query
        .address
        .filter(|a| !a.is_empty())
        .map(WalletAddress::new);
    let txs = state
        .bridge
        .transactions(involving.as_ref())
        .map_err(|e| ApiError::from_bridge(e, "fetch transactions"))?;
    Ok(Json(txs))
}

pub async fn get_bridge_transaction(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<BridgeTransaction>> {
    state
        .bridge
        .transaction(&EntityId::from(id))
        .map_err(|e| ApiError::from_bridge(e, "fetch transaction"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Transaction"))
}

pub async fn create_bridge_transaction(
    State(state): State<Arc<ApiState>>,
    body: Body<TransferRequest>,
) -> ApiResult<(StatusCode, Json<BridgeTransaction>)> {
    let body = validation::json_body(body, validation::TRANSFER)?;
    let transfer = validation::transfer_request(body)?;
    let tx = state
        .bridge
        .submit(transfer)
        .map_err(|e| ApiError::from_bridge(e, "create bridge transaction"))?;
    Ok((StatusCode::CREATED, Json(tx)))
}

// ── Wallet ───────────────────────────────────────────────────────────────

pub async fn get_wallet_balance(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<BalanceView>> {
    let view = state
        .wallet
        .lookup(&WalletAddress::new(address))
        .map_err(|e| ApiError::from_wallet(e, "fetch balance"))?;
    Ok(Json(view))
}

/// `GET /api/wallet/balance` is claimed by the static route, so the wallet
/// whose address is literally `balance` is looked up here.
pub async fn get_balance_named_wallet(
    state: State<Arc<ApiState>>,
) -> ApiResult<Json<BalanceView>> {
    get_wallet_balance(state, Path("balance".to_string())).await
}

pub async fn update_wallet_balance(
    State(state): State<Arc<ApiState>>,
    body: Body<BalanceRequest>,
) -> ApiResult<Json<WalletBalance>> {
    let body = validation::json_body(body, validation::BALANCE)?;
    let (address, balance) = validation::balance_request(body)?;
    let stored = state
        .wallet
        .upsert(&address, balance)
        .map_err(|e| ApiError::from_wallet(e, "update balance"))?;
    Ok(Json(stored))
}

// ── Service ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

pub async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: state.clock.now(),
    })
}

pub async fn list_chains() -> Json<Vec<ChainInfo>> {
    Json(ChainId::registry())
}
