use serde::Deserialize;
use utoipa::IntoParams;

use clientele_customers::LookupKey;

/// `GET /customers?name=..` or `GET /customers?email=..`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerLookupQuery {
    /// Exact customer name; the earliest created match is returned.
    pub name: Option<String>,
    /// Exact email address.
    pub email: Option<String>,
}

impl CustomerLookupQuery {
    /// Exactly one of `name` / `email` must be given.
    pub fn into_key(self) -> Result<LookupKey, &'static str> {
        match (self.name, self.email) {
            (Some(name), None) => Ok(LookupKey::Name(name)),
            (None, Some(email)) => Ok(LookupKey::Email(email)),
            (None, None) => Err("provide either a name or an email query parameter"),
            (Some(_), Some(_)) => Err("provide only one of name or email, not both"),
        }
    }
}
