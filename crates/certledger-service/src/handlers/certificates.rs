//! Certificate lifecycle and transfer handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use certledger_contract::{Issued, TransferReceipt};
use certledger_core::{
    AuthorityId, CertificateId, EnergyCertificate, NewCertificate, ProducerId, UserId,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Issue certificate request.
#[derive(Debug, Deserialize)]
pub struct CreateCertificateRequest {
    /// Initial owner.
    pub owner_id: String,
    /// Producing party.
    pub producer_id: String,
    /// ISO-8601 emission date.
    pub emission_date: String,
    /// Usable month.
    pub usable_month: i32,
    /// Usable year.
    pub usable_year: i32,
    /// Certifying authority.
    pub regulatory_authority_id: String,
}

impl From<CreateCertificateRequest> for NewCertificate {
    fn from(req: CreateCertificateRequest) -> Self {
        Self {
            owner_id: UserId::new(req.owner_id),
            producer_id: ProducerId::new(req.producer_id),
            emission_date: req.emission_date,
            usable_month: req.usable_month,
            usable_year: req.usable_year,
            regulatory_authority_id: AuthorityId::new(req.regulatory_authority_id),
        }
    }
}

/// Issue a certificate. The id is the invocation id.
pub async fn create_certificate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<Issued>), ApiError> {
    let issued = state.submit(|c, ctx| c.create(ctx, req.into()))?;

    tracing::info!(certificate_id = %issued.id, "Certificate issued");

    Ok((StatusCode::CREATED, Json(issued)))
}

/// Read a certificate.
pub async fn get_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EnergyCertificate>, ApiError> {
    let id = CertificateId::new(id);
    let certificate = state.evaluate(|c, ctx| c.read(ctx, &id))?;
    Ok(Json(certificate))
}

/// Existence check response.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    /// Whether a certificate is stored under the id.
    pub exists: bool,
}

/// Check whether a certificate exists.
pub async fn certificate_exists(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let id = CertificateId::new(id);
    let exists = state.evaluate(|c, ctx| c.exists(ctx, &id))?;
    Ok(Json(ExistsResponse { exists }))
}

/// Update usable period request.
#[derive(Debug, Deserialize)]
pub struct UpdateCertificateRequest {
    /// New usable month.
    pub usable_month: i32,
    /// New usable year.
    pub usable_year: i32,
}

/// Update a certificate's usable period.
///
/// Whether the new period is stored depends on the configured update mode.
pub async fn update_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCertificateRequest>,
) -> Result<StatusCode, ApiError> {
    let id = CertificateId::new(id);
    state.submit(|c, ctx| c.update(ctx, &id, req.usable_month, req.usable_year))?;

    tracing::info!(
        certificate_id = %id,
        usable_month = req.usable_month,
        usable_year = req.usable_year,
        "Certificate update submitted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a certificate. Its transfer records are kept.
pub async fn delete_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = CertificateId::new(id);
    state.submit(|c, ctx| c.delete(ctx, &id))?;

    tracing::info!(certificate_id = %id, "Certificate deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Transfer request.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Buyer.
    pub new_owner_id: String,
    /// Agreed price.
    pub price: f64,
}

/// Transfer a certificate and record the transaction.
pub async fn transfer_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferReceipt>), ApiError> {
    let id = CertificateId::new(id);
    let receipt =
        state.submit(|c, ctx| c.transfer(ctx, &id, UserId::new(req.new_owner_id), req.price))?;

    tracing::info!(
        certificate_id = %id,
        transaction_key = %receipt.transaction_key,
        from = %receipt.transaction.from_user_id,
        to = %receipt.transaction.to_user_id,
        "Certificate transferred"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Certificate search parameters. Exactly one must be set.
#[derive(Debug, Deserialize)]
pub struct ListCertificatesQuery {
    /// Current owner.
    pub owner: Option<String>,
    /// Producing party.
    pub producer: Option<String>,
}

/// Find certificates by owner or by producer.
pub async fn list_certificates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCertificatesQuery>,
) -> Result<Json<Vec<EnergyCertificate>>, ApiError> {
    let certificates = match (query.owner, query.producer) {
        (Some(owner), None) => {
            let owner = UserId::new(owner);
            state.evaluate(|c, ctx| c.certificates_by_owner(ctx, &owner))?
        }
        (None, Some(producer)) => {
            let producer = ProducerId::new(producer);
            state.evaluate(|c, ctx| c.certificates_by_producer(ctx, &producer))?
        }
        _ => {
            return Err(ApiError::BadRequest(
                "exactly one of `owner` or `producer` is required".into(),
            ))
        }
    };

    Ok(Json(certificates))
}
