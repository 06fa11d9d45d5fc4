//! Request validation: field constraints checked before any create or update.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use clientele_core::{DomainResult, FieldErrors};

use crate::customer::{CustomerDraft, CustomerRequest};

pub const NAME_MAX_CHARS: usize = 100;

/// Largest storable spend is 99 999 999.99 (`NUMERIC(10,2)`).
const SPEND_UPPER_BOUND: Decimal = dec!(100000000);
const SPEND_MAX_SCALE: u32 = 2;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Check every field of `request`, collecting one message per failing field.
///
/// On success returns the normalized draft (name and email trimmed) that the
/// service is allowed to persist.
pub fn validate_request(request: &CustomerRequest) -> DomainResult<CustomerDraft> {
    let mut errors = FieldErrors::new();

    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if name.chars().count() > NAME_MAX_CHARS {
        errors.add("name", "Name must be less than 100 characters");
    }

    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Email should be valid");
    }

    if let Some(spend) = request.annual_spend {
        if spend < Decimal::ZERO {
            errors.add("annual_spend", "Annual spend must not be negative");
        } else if spend.normalize().scale() > SPEND_MAX_SCALE || spend >= SPEND_UPPER_BOUND {
            errors.add(
                "annual_spend",
                "Annual spend must fit 8 integer digits and 2 decimal places",
            );
        }
    }

    errors.into_result()?;

    Ok(CustomerDraft {
        name: name.to_string(),
        email: email.to_string(),
        annual_spend: request.annual_spend.map(to_storage_scale),
        last_purchase_date: request.last_purchase_date,
    })
}

/// Fix the scale at two places, as the amount is stored (`10.5` → `10.50`).
fn to_storage_scale(spend: Decimal) -> Decimal {
    let mut scaled = spend.normalize();
    scaled.rescale(SPEND_MAX_SCALE);
    scaled
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
