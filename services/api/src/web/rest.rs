//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the contract endpoints and the master
//! definition for the OpenAPI specification.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use contract_review_core::domain::{Contract, Identity, Issue, Review};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::auth::{LoginResponse, RegisterResponse, UserResponse};
use crate::web::error::{bad_request, from_port, ErrorBody, ErrorResponse};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        upload_contract_handler,
        list_contracts_handler,
        delete_contract_handler,
        get_review_handler,
        generate_review_handler,
    ),
    components(
        schemas(
            crate::web::auth::RegisterRequest,
            crate::web::auth::LoginRequest,
            RegisterResponse,
            LoginResponse,
            UserResponse,
            UploadResponse,
            ContractResponse,
            DeleteResponse,
            ReviewResponse,
            IssueResponse,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Contract Review API", description = "API endpoints for uploading contracts and requesting risk reviews.")
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload sent after successfully uploading a contract.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub contract_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    pub contract_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
}

impl ContractResponse {
    fn from_domain(contract: Contract) -> Self {
        Self {
            contract_id: contract.id,
            file_name: contract.file_name,
            file_path: contract.file_ref,
            uploaded_at: contract.uploaded_at,
            status: contract.status.as_str().to_string(),
            risk_score: contract.risk_score,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    pub clause: String,
    pub risk: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl IssueResponse {
    fn from_domain(issue: Issue) -> Self {
        Self {
            clause: issue.clause,
            risk: issue.risk,
            recommendation: issue.recommendation,
            severity: issue.severity,
            explanation: issue.explanation,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub contract_id: Uuid,
    pub risk_score: u8,
    pub issues: Vec<IssueResponse>,
}

impl ReviewResponse {
    fn from_domain(review: Review) -> Self {
        Self {
            contract_id: review.contract_id,
            risk_score: review.risk_score,
            issues: review
                .issues
                .into_iter()
                .map(IssueResponse::from_domain)
                .collect(),
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Upload a contract file.
///
/// Accepts a multipart/form-data request with a single file part. The file
/// bytes go to the blob store; only the returned location reference is kept.
#[utoipa::path(
    post,
    path = "/api/contracts/upload",
    request_body(content_type = "multipart/form-data", description = "The contract file to upload."),
    responses(
        (status = 201, description = "Contract uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file part in the request", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_contract_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ErrorResponse> {
    // 1. Pull the file part out of the multipart body
    let mut file_part = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Failed to read multipart data: {}", e)))?
    {
        if field.file_name().is_some() {
            let name = field.file_name().unwrap_or("untitled").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("Failed to read file bytes: {}", e)))?;
            file_part = Some((name, data));
            break;
        }
    }
    let (file_name, data) =
        file_part.ok_or_else(|| bad_request("Invalid file format"))?;

    // 2. Hand the bytes to the blob store, keep only the reference
    let file_ref = state
        .files
        .store_file(&file_name, &data)
        .await
        .map_err(|e| {
            error!("Failed to store uploaded file: {:?}", e);
            from_port(e)
        })?;

    // 3. Record the contract for the caller, status Pending
    let contract = state
        .store
        .insert_contract(identity.user_id, &file_name, &file_ref)
        .await
        .map_err(from_port)?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Contract uploaded successfully".to_string(),
            contract_id: contract.id,
        }),
    ))
}

/// List the caller's contracts, in upload order.
#[utoipa::path(
    get,
    path = "/api/contracts",
    responses(
        (status = 200, description = "The caller's contracts", body = [ContractResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn list_contracts_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let contracts = state
        .store
        .contracts_for_owner(identity.user_id)
        .await
        .map_err(from_port)?;

    let payload: Vec<ContractResponse> = contracts
        .into_iter()
        .map(ContractResponse::from_domain)
        .collect();
    Ok(Json(payload))
}

/// Delete one of the caller's contracts.
///
/// Idempotent: an unknown id, or an id owned by someone else, is a no-op and
/// still answers 200. Any stored review is removed along with the contract.
#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    params(("id" = Uuid, Path, description = "The contract identifier")),
    responses(
        (status = 200, description = "Contract deleted (or already absent)", body = DeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_contract_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ErrorResponse> {
    state
        .store
        .delete_contract(identity.user_id, id)
        .await
        .map_err(from_port)?;

    Ok(Json(DeleteResponse {
        message: "Contract deleted successfully".to_string(),
    }))
}

/// Fetch the stored review for one of the caller's contracts.
#[utoipa::path(
    get,
    path = "/api/contracts/{id}/review",
    params(("id" = Uuid, Path, description = "The contract identifier")),
    responses(
        (status = 200, description = "The stored review", body = ReviewResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 404, description = "Unknown contract or no review yet", body = ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn get_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let review = state
        .store
        .review_for_contract(identity.user_id, id)
        .await
        .map_err(from_port)?;

    Ok(Json(ReviewResponse::from_domain(review)))
}

/// Generate (or regenerate) the risk review for one of the caller's contracts.
///
/// Runs the analysis capability over the stored file reference and persists
/// the result, replacing any previous review and marking the contract Analyzed.
#[utoipa::path(
    post,
    path = "/api/contracts/{id}/review",
    params(("id" = Uuid, Path, description = "The contract identifier")),
    responses(
        (status = 200, description = "The freshly generated review", body = ReviewResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 404, description = "Unknown contract", body = ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn generate_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ErrorResponse> {
    // 1. Resolve the contract's file reference, checking ownership
    let contracts = state
        .store
        .contracts_for_owner(identity.user_id)
        .await
        .map_err(from_port)?;
    let contract = contracts
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| from_port(contract_not_found(id)))?;

    // 2. Run the analysis capability
    let assessment = state.analysis.analyze(&contract.file_ref).await.map_err(|e| {
        error!("Analysis failed for contract {}: {:?}", id, e);
        from_port(e)
    })?;

    // 3. Persist it as the contract's one review
    let review = state
        .store
        .save_review(identity.user_id, id, assessment)
        .await
        .map_err(from_port)?;

    Ok(Json(ReviewResponse::from_domain(review)))
}

fn contract_not_found(id: Uuid) -> contract_review_core::ports::PortError {
    contract_review_core::ports::PortError::NotFound(format!("Contract {} not found", id))
}
