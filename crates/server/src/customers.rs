//! REST routes for customer records.
//!
//! Endpoints:
//! - `GET    /api/customers`       — list every customer
//! - `POST   /api/customers`       — create a customer record
//! - `GET    /api/customers/{id}`  — fetch one customer
//! - `PUT    /api/customers/{id}`  — replace a customer record
//! - `DELETE /api/customers/{id}`  — remove a customer record

use crate::service::{CustomerService, ServiceError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rolodex_core::{Customer, CustomerId};
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct CustomersState {
    service: CustomerService,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub fn router(service: CustomerService) -> Router {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(CustomersState { service })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_customers(
    State(state): State<CustomersState>,
) -> Result<Json<Vec<Customer>>, Response> {
    let customers = state.service.list_all().await.map_err(service_error)?;
    Ok(Json(customers))
}

async fn get_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
) -> Result<Json<Customer>, Response> {
    let customer = state.service.get_by_id(CustomerId(id)).await.map_err(service_error)?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<CustomersState>,
    Json(body): Json<Customer>,
) -> Result<Json<Customer>, Response> {
    validate_payload(&body)?;

    let saved = state.service.create(body).await.map_err(service_error)?;
    if let Some(id) = saved.id {
        info!(event_name = "api.customer.created", customer_id = %id, "customer record created");
    }
    Ok(Json(saved))
}

async fn update_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
    Json(body): Json<Customer>,
) -> Result<Json<Customer>, Response> {
    validate_payload(&body)?;

    let saved = state.service.update(CustomerId(id), body).await.map_err(service_error)?;
    info!(event_name = "api.customer.updated", customer_id = id, "customer record replaced");
    Ok(Json(saved))
}

async fn delete_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
) -> Result<StatusCode, Response> {
    state.service.delete(CustomerId(id)).await.map_err(service_error)?;
    info!(event_name = "api.customer.deleted", customer_id = id, "customer record deleted");
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Boundary checks applied to create and update payloads. Anything deeper
/// (address shape, phone formats) is deliberately left to callers.
fn validate_payload(customer: &Customer) -> Result<(), Response> {
    if customer.first_name.trim().is_empty() {
        return Err(bad_request("firstName must not be blank"));
    }
    if customer.last_name.trim().is_empty() {
        return Err(bad_request("lastName must not be blank"));
    }
    if let Some(number) = customer.national_security_number.as_deref() {
        if !is_well_formed_nsn(number) {
            return Err(bad_request("nationalSecurityNumber must match the 000-00-0000 format"));
        }
    }
    Ok(())
}

/// Shape check for national security numbers: three digits, two digits and
/// four digits separated by hyphens.
fn is_well_formed_nsn(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 11 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, byte)| match index {
        3 | 6 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    })
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: message.to_string() })).into_response()
}

fn service_error(error: ServiceError) -> Response {
    match error {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        ServiceError::Repository(source) => {
            error!(error = %source, "customer repository error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError { error: "an internal error occurred".to_string() }),
            )
                .into_response()
        }
    }
}
