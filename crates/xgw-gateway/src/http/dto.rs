//! JSON request/response shapes for the HTTP surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct OrderAck {
    pub status: &'static str,
    pub order_id: u64,
    pub user_id: u64,
    pub symbol: u32,
}

/// Body of a balance/holdings query: the caller's own correlation id,
/// echoed back unchanged in the ack.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query_id: u64,
}

#[derive(Debug, Serialize)]
pub struct CancelAck {
    pub status: &'static str,
    pub order_id: u64,
    pub user_id: u64,
    pub symbol: u32,
}

#[derive(Debug, Serialize)]
pub struct QueryAck {
    pub status: &'static str,
    pub query_id: u64,
    pub user_id: u64,
}
