//! Transfer history handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use certledger_core::{CertificateId, Transaction, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Read a transaction by its full `TRANSACTION_<id>` key.
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.evaluate(|c, ctx| c.query_transaction(ctx, &key))?;
    Ok(Json(transaction))
}

/// Transaction search parameters. Exactly one must be set.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Seller.
    pub from: Option<String>,
    /// Buyer.
    pub to: Option<String>,
    /// Transferred certificate.
    pub certificate: Option<String>,
}

/// Find transactions by seller, buyer or certificate.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = match (query.from, query.to, query.certificate) {
        (Some(from), None, None) => {
            let user = UserId::new(from);
            state.evaluate(|c, ctx| c.transactions_by_from_user(ctx, &user))?
        }
        (None, Some(to), None) => {
            let user = UserId::new(to);
            state.evaluate(|c, ctx| c.transactions_by_to_user(ctx, &user))?
        }
        (None, None, Some(certificate)) => {
            let certificate = CertificateId::new(certificate);
            state.evaluate(|c, ctx| c.transactions_by_certificate(ctx, &certificate))?
        }
        _ => {
            return Err(ApiError::BadRequest(
                "exactly one of `from`, `to` or `certificate` is required".into(),
            ))
        }
    };

    Ok(Json(transactions))
}
