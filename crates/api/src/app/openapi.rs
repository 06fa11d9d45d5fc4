//! OpenAPI description of the HTTP surface, generated from the handlers.

use axum::Json;
use utoipa::OpenApi;

use clientele_customers::{CustomerRequest, CustomerResponse, Tier};

use crate::app::errors::ErrorBody;
use crate::app::routes::{customers, system};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "clientele",
        description = "Customer records with a derived loyalty tier"
    ),
    paths(
        system::health,
        customers::create_customer,
        customers::find_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer
    ),
    components(schemas(CustomerRequest, CustomerResponse, Tier, ErrorBody)),
    tags(
        (name = "customers", description = "Customer record management"),
        (name = "system", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_customer_route_is_described() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/customers"));
        assert!(paths.contains_key("/customers/{id}"));

        let schemas = &doc.components.as_ref().unwrap().schemas;
        for name in ["CustomerRequest", "CustomerResponse", "Tier", "ErrorBody"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
