use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use clientele_core::{CustomerId, Entity, ValueObject};

use crate::tier::{Tier, classify};

/// Incoming create/update payload, exactly as the client sent it.
///
/// Every field is optional at this level so that a missing `name` is reported
/// as a validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CustomerRequest {
    #[schema(example = "Ada Lovelace", max_length = 100)]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(value_type = Option<String>, example = "15000.00")]
    pub annual_spend: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date, example = "2025-03-01")]
    pub last_purchase_date: Option<NaiveDate>,
}

/// The mutable fields of a customer after validation and normalization.
///
/// Only `validate_request` can produce one, so a record built from a draft has
/// always passed the name and email constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) annual_spend: Option<Decimal>,
    pub(crate) last_purchase_date: Option<NaiveDate>,
}

impl ValueObject for CustomerDraft {}

impl CustomerDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn annual_spend(&self) -> Option<Decimal> {
        self.annual_spend
    }

    pub fn last_purchase_date(&self) -> Option<NaiveDate> {
        self.last_purchase_date
    }
}

/// A stored customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    annual_spend: Option<Decimal>,
    last_purchase_date: Option<NaiveDate>,
}

impl Customer {
    /// Build a new record from a validated draft and a directory-assigned id.
    pub fn new(id: CustomerId, draft: CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            annual_spend: draft.annual_spend,
            last_purchase_date: draft.last_purchase_date,
        }
    }

    /// Rehydrate a record read back from storage.
    ///
    /// Storage only ever holds validated records, so no checks run here.
    pub fn restore(
        id: CustomerId,
        name: String,
        email: String,
        annual_spend: Option<Decimal>,
        last_purchase_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            annual_spend,
            last_purchase_date,
        }
    }

    /// Replace every mutable field with the draft's values. The id is kept.
    pub fn apply(&mut self, draft: CustomerDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.annual_spend = draft.annual_spend;
        self.last_purchase_date = draft.last_purchase_date;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn annual_spend(&self) -> Option<Decimal> {
        self.annual_spend
    }

    pub fn last_purchase_date(&self) -> Option<NaiveDate> {
        self.last_purchase_date
    }

    /// Loyalty tier as of `today`.
    pub fn tier(&self, today: NaiveDate) -> Tier {
        classify(self.annual_spend, self.last_purchase_date, today)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Key a customer was looked up by. Carried into not-found errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(CustomerId),
    Name(String),
    Email(String),
}

impl core::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id: {id}"),
            LookupKey::Name(name) => write!(f, "name: {name}"),
            LookupKey::Email(email) => write!(f, "email: {email}"),
        }
    }
}

/// Outbound view of a customer: the stored fields plus a freshly computed tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    #[schema(value_type = String, example = "01890a5d-ac96-774b-bcce-b302099a8057")]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[schema(value_type = Option<String>, example = "15000.00")]
    pub annual_spend: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub last_purchase_date: Option<NaiveDate>,
    pub tier: Tier,
}

impl CustomerResponse {
    pub fn assemble(customer: &Customer, today: NaiveDate) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            annual_spend: customer.annual_spend,
            last_purchase_date: customer.last_purchase_date,
            tier: customer.tier(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_request;
    use rust_decimal_macros::dec;

    fn test_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    fn draft(name: &str, email: &str, spend: Option<Decimal>, date: Option<NaiveDate>) -> CustomerDraft {
        validate_request(&CustomerRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            annual_spend: spend,
            last_purchase_date: date,
        })
        .unwrap()
    }

    #[test]
    fn apply_replaces_mutable_fields_and_keeps_id() {
        let id = CustomerId::new();
        let mut customer = Customer::new(
            id,
            draft("Old Name", "old@example.com", Some(dec!(50)), Some(test_today())),
        );

        customer.apply(draft("New Name", "new@example.com", None, None));

        assert_eq!(*customer.id(), id);
        assert_eq!(customer.name(), "New Name");
        assert_eq!(customer.email(), "new@example.com");
        assert_eq!(customer.annual_spend(), None);
        assert_eq!(customer.last_purchase_date(), None);
    }

    #[test]
    fn response_carries_fields_and_computed_tier() {
        let customer = Customer::new(
            CustomerId::new(),
            draft("Ada", "ada@example.com", Some(dec!(12000)), Some(test_today())),
        );

        let response = CustomerResponse::assemble(&customer, test_today());
        assert_eq!(&response.id, customer.id());
        assert_eq!(response.name, "Ada");
        assert_eq!(response.email, "ada@example.com");
        assert_eq!(response.annual_spend, Some(dec!(12000)));
        assert_eq!(response.tier, Tier::Platinum);
    }

    #[test]
    fn tier_is_recomputed_against_the_given_date() {
        let customer = Customer::new(
            CustomerId::new(),
            draft("Ada", "ada@example.com", Some(dec!(12000)), Some(test_today())),
        );

        let two_years_later = NaiveDate::from_ymd_opt(2027, 8, 15).unwrap();
        assert_eq!(CustomerResponse::assemble(&customer, two_years_later).tier, Tier::Silver);
    }

    #[test]
    fn request_accepts_numeric_or_string_spend_and_missing_fields() {
        let req: CustomerRequest =
            serde_json::from_str(r#"{"name":"Ada","annual_spend":1500.5}"#).unwrap();
        assert_eq!(req.annual_spend, Some(dec!(1500.5)));
        assert_eq!(req.email, None);

        let req: CustomerRequest = serde_json::from_str(
            r#"{"email":"a@b.io","annual_spend":"99.99","last_purchase_date":"2025-01-31"}"#,
        )
        .unwrap();
        assert_eq!(req.annual_spend, Some(dec!(99.99)));
        assert_eq!(req.last_purchase_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn lookup_keys_render_for_diagnostics() {
        assert_eq!(LookupKey::Name("Ada".into()).to_string(), "name: Ada");
        assert_eq!(LookupKey::Email("a@b.io".into()).to_string(), "email: a@b.io");
    }
}
