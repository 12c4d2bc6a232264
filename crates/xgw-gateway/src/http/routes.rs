//! Axum router wiring.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use xgw_ring::query_type;

use crate::adapters::cancel::CancelOrderRequest;
use crate::adapters::order::NewOrderRequest;
use crate::adapters::query::{add_user_on_login, balance_or_holdings};
use crate::auth::{issue_token, AuthUser};
use crate::error::AppError;
use crate::http::dto::{CancelAck, OrderAck, QueryAck, QueryRequest, TokenRequest, TokenResponse};
use crate::identity::AuthOutcome;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/oauth2/token", post(issue_token_handler))
        .route("/api/order", post(post_order))
        .route("/api/cancel/:order_id", delete(delete_cancel))
        .route("/api/balance/:user_id", get(get_balance))
        .route("/api/holdings/:user_id", get(get_holdings))
        .with_state(state)
}

async fn issue_token_handler(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (user_id, created) = match state.user_store.authenticate(&req.username, &req.password) {
        AuthOutcome::Ok(user_id) => (user_id, false),
        AuthOutcome::WrongPassword => return Err(AppError::BadCredentials),
        AuthOutcome::NotFound => (state.user_store.create(&req.username, &req.password), true),
    };

    if created {
        // Matches the original's default for new logins: query_id 0.
        let record = add_user_on_login(0, user_id);
        state.rings.queries.enqueue(record).await?;
    }

    let token = issue_token(user_id, &state.config.jwt_secret, state.config.jwt_ttl)?;
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
        expires_in: state.config.jwt_ttl.as_secs(),
    }))
}

async fn post_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewOrderRequest>,
) -> Result<Json<OrderAck>, AppError> {
    req.validate()?;
    let order_id = req.order_id;
    let symbol = req.symbol;
    let record = req.into_record(auth.user_id);

    state.rings.incoming_orders.enqueue(record).await?;

    Ok(Json(OrderAck {
        status: "Order placed successfully",
        order_id,
        user_id: auth.user_id,
        symbol,
    }))
}

async fn delete_cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<u64>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<Json<CancelAck>, AppError> {
    if req.order_id != order_id {
        return Err(AppError::InvalidRequest(
            "order_id in path and body must match".to_string(),
        ));
    }
    let symbol = req.symbol;
    let record = req.into_record(auth.user_id);

    state.rings.cancel_orders.enqueue(record).await?;

    Ok(Json(CancelAck {
        status: "Order cancel request sent successfully",
        order_id,
        user_id: auth.user_id,
        symbol,
    }))
}

async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<u64>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryAck>, AppError> {
    query_for(&state, auth, user_id, req, query_type::GET_BALANCE).await
}

async fn get_holdings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<u64>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryAck>, AppError> {
    query_for(&state, auth, user_id, req, query_type::GET_HOLDINGS).await
}

async fn query_for(
    state: &AppState,
    auth: AuthUser,
    path_user_id: u64,
    req: QueryRequest,
    kind: u8,
) -> Result<Json<QueryAck>, AppError> {
    if path_user_id != auth.user_id {
        return Err(AppError::InvalidRequest(
            "user_id in path must match the authenticated caller".to_string(),
        ));
    }

    let record = balance_or_holdings(req.query_id, auth.user_id, kind);

    state.rings.queries.enqueue(record).await?;

    Ok(Json(QueryAck {
        status: "Query sent successfully",
        query_id: req.query_id,
        user_id: auth.user_id,
    }))
}
