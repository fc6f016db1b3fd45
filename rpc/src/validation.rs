//! Request bodies and their validation.
//!
//! Bodies deserialize into request structs whose fields are all optional
//! and loosely typed, so a bad request reports every problem at once rather
//! than the first one serde trips over.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use umbra_bridge::NewTransfer;
use umbra_governance::{Ballot, NewProposal};
use umbra_types::{
    BridgeStatus, ChainId, EntityId, ProposalStatus, Sealed, Timestamp, WalletAddress,
};

use crate::error::ApiError;

pub const PROPOSAL: &str = "Invalid proposal data";
pub const VOTE: &str = "Invalid vote data";
pub const TRANSFER: &str = "Invalid transaction data";
pub const BALANCE: &str = "Missing required fields";

/// One problem with one field of a request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// A body field as sent: a string, or any other JSON value (reported by type).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Text(String),
    Other(Value),
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Loose::Text(s.to_string())
    }
}

/// `POST /api/proposals`. Counters may be sent under their `encryptedVotes*`
/// names as well.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub title: Option<Loose>,
    pub description: Option<Loose>,
    pub proposer: Option<Loose>,
    pub deadline: Option<Loose>,
    pub status: Option<Loose>,
    #[serde(alias = "encryptedVotesFor")]
    pub votes_for: Option<Loose>,
    #[serde(alias = "encryptedVotesAgainst")]
    pub votes_against: Option<Loose>,
    #[serde(alias = "encryptedVotesAbstain")]
    pub votes_abstain: Option<Loose>,
}

/// `POST /api/vote`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotRequest {
    pub proposal_id: Option<Loose>,
    pub voter: Option<Loose>,
    pub choice: Option<Loose>,
}

/// `POST /api/bridge`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_chain: Option<Loose>,
    pub to_chain: Option<Loose>,
    pub token: Option<Loose>,
    pub encrypted_amount: Option<Loose>,
    pub sender: Option<Loose>,
    pub recipient: Option<Loose>,
    pub status: Option<Loose>,
}

/// `POST /api/wallet/balance`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    pub address: Option<Loose>,
    pub encrypted_balance: Option<Loose>,
}

/// Unwrap an extracted body, turning a malformed payload into a validation
/// error with a single `body` detail.
pub fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    context: &'static str,
) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| ApiError::invalid(context, "body", rejection.body_text()))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.0.push(FieldIssue::new(path, message));
    }

    fn optional(&mut self, path: &str, field: Option<Loose>) -> Option<String> {
        match field? {
            Loose::Text(s) => Some(s),
            Loose::Other(v) => {
                self.push(path, format!("Expected string, received {}", type_name(&v)));
                None
            }
        }
    }

    fn required(&mut self, path: &str, field: Option<Loose>) -> Option<String> {
        if field.is_none() {
            self.push(path, "Required");
            return None;
        }
        self.optional(path, field)
    }

    fn non_empty(&mut self, path: &str, field: Option<Loose>) -> Option<String> {
        let s = self.required(path, field)?;
        if s.trim().is_empty() {
            self.push(path, "Must not be empty");
            return None;
        }
        Some(s)
    }

    fn parsed<T>(
        &mut self,
        path: &str,
        raw: Option<String>,
        parse: impl FnOnce(&str) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        let raw = raw?;
        let parsed = parse(&raw);
        if parsed.is_none() {
            self.push(path, message);
        }
        parsed
    }

    fn chain(&mut self, path: &str, field: Option<Loose>) -> Option<ChainId> {
        let raw = self.non_empty(path, field)?;
        match raw.parse() {
            Ok(chain) => Some(chain),
            Err(e) => {
                self.push(path, format!("{e}"));
                None
            }
        }
    }

    fn finish(self, context: &'static str) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation {
                context,
                details: self.0,
            })
        }
    }
}

fn incomplete(context: &'static str) -> ApiError {
    ApiError::invalid(context, "", "Incomplete request")
}

pub fn proposal_request(req: ProposalRequest) -> Result<NewProposal, ApiError> {
    let mut issues = Issues::default();
    let title = issues.required("title", req.title);
    let description = issues.required("description", req.description);
    let proposer = issues.non_empty("proposer", req.proposer);

    let deadline = issues.required("deadline", req.deadline);
    let deadline = issues.parsed(
        "deadline",
        deadline,
        |s| Timestamp::parse(s).ok(),
        "Invalid date",
    );

    let status = issues.optional("status", req.status);
    let status = issues.parsed(
        "status",
        status,
        |s| s.parse::<ProposalStatus>().ok(),
        "Invalid enum value. Expected 'active' | 'passed' | 'rejected'",
    );

    let votes_for = issues.optional("votesFor", req.votes_for).map(Sealed::new);
    let votes_against = issues
        .optional("votesAgainst", req.votes_against)
        .map(Sealed::new);
    let votes_abstain = issues
        .optional("votesAbstain", req.votes_abstain)
        .map(Sealed::new);

    issues.finish(PROPOSAL)?;
    match (title, description, proposer, deadline) {
        (Some(title), Some(description), Some(proposer), Some(deadline)) => {
            let mut input =
                NewProposal::new(title, description, WalletAddress::new(proposer), deadline);
            input.status = status;
            input.votes_for = votes_for;
            input.votes_against = votes_against;
            input.votes_abstain = votes_abstain;
            Ok(input)
        }
        _ => Err(incomplete(PROPOSAL)),
    }
}

/// The choice is kept as sent; the engine decides what it counts toward.
pub fn ballot_request(req: BallotRequest) -> Result<Ballot, ApiError> {
    let mut issues = Issues::default();
    let proposal_id = issues.non_empty("proposalId", req.proposal_id);
    let voter = issues.non_empty("voter", req.voter);
    let choice = issues.required("choice", req.choice);
    issues.finish(VOTE)?;

    match (proposal_id, voter, choice) {
        (Some(id), Some(voter), Some(choice)) => Ok(Ballot::new(
            EntityId::from(id),
            WalletAddress::new(voter),
            choice,
        )),
        _ => Err(incomplete(VOTE)),
    }
}

/// A client-supplied `status` is tolerated only when it is `pending`;
/// settlement is the server's job.
pub fn transfer_request(req: TransferRequest) -> Result<NewTransfer, ApiError> {
    let mut issues = Issues::default();
    let from_chain = issues.chain("fromChain", req.from_chain);
    let to_chain = issues.chain("toChain", req.to_chain);
    let token = issues.non_empty("token", req.token);
    let encrypted_amount = issues.non_empty("encryptedAmount", req.encrypted_amount);
    let sender = issues.non_empty("sender", req.sender);
    let recipient = issues.non_empty("recipient", req.recipient);

    if let Some(raw) = issues.optional("status", req.status) {
        if raw.parse::<BridgeStatus>() != Ok(BridgeStatus::Pending) {
            issues.push("status", "New transactions must be 'pending'");
        }
    }
    issues.finish(TRANSFER)?;

    match (from_chain, to_chain, token, encrypted_amount, sender, recipient) {
        (
            Some(from_chain),
            Some(to_chain),
            Some(token),
            Some(amount),
            Some(sender),
            Some(recipient),
        ) => Ok(NewTransfer {
            from_chain,
            to_chain,
            token,
            encrypted_amount: Sealed::new(amount),
            sender: WalletAddress::new(sender),
            recipient: WalletAddress::new(recipient),
        }),
        _ => Err(incomplete(TRANSFER)),
    }
}

pub fn balance_request(req: BalanceRequest) -> Result<(WalletAddress, Sealed), ApiError> {
    let mut issues = Issues::default();
    let address = issues.non_empty("address", req.address);
    let balance = issues.non_empty("encryptedBalance", req.encrypted_balance);
    issues.finish(BALANCE)?;

    match (address, balance) {
        (Some(address), Some(balance)) => Ok((WalletAddress::new(address), Sealed::new(balance))),
        _ => Err(incomplete(BALANCE)),
    }
}
