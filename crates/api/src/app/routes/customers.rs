use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use clientele_core::CustomerId;
use clientele_customers::{CustomerRequest, CustomerResponse, LookupKey};

use crate::app::dto::CustomerLookupQuery;
use crate::app::errors::{self, ErrorBody};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(find_customer).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse,
            headers(("location" = String, description = "Path of the new customer"))),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(e) => return malformed_body(e),
    };

    match services.customers.create(request).await {
        Ok(created) => {
            let location = format!("/customers/{}", created.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(created),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (UUID)")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No customer with this id", body = ErrorBody)
    )
)]
pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<CustomerId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.customers.get_by_id(id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(CustomerLookupQuery),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 400, description = "Neither or both of name and email given", body = ErrorBody),
        (status = 404, description = "No matching customer", body = ErrorBody)
    )
)]
pub async fn find_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CustomerLookupQuery>,
) -> axum::response::Response {
    let key = match query.into_key() {
        Ok(key) => key,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
    };

    let result = match &key {
        LookupKey::Name(name) => services.customers.get_by_name(name).await,
        LookupKey::Email(email) => services.customers.get_by_email(email).await,
        LookupKey::Id(id) => services.customers.get_by_id(*id).await,
    };

    match result {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (UUID)")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Malformed id, body or field values", body = ErrorBody),
        (status = 404, description = "No customer with this id", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match id.parse::<CustomerId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(request) = match body {
        Ok(b) => b,
        Err(e) => return malformed_body(e),
    };

    match services.customers.update(id, request).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (UUID)")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No customer with this id", body = ErrorBody)
    )
)]
pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<CustomerId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.customers.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn malformed_body(rejection: JsonRejection) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "bad_request", rejection.body_text())
}
