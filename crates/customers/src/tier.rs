//! Loyalty tier classification.
//!
//! A tier is never stored. It is derived from the customer's annual spend and
//! last purchase date every time a customer is read.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PLATINUM_SPEND_THRESHOLD: Decimal = dec!(10000);
pub const GOLD_SPEND_THRESHOLD: Decimal = dec!(1000);
pub const PLATINUM_RECENCY_MONTHS: u32 = 6;
pub const GOLD_RECENCY_MONTHS: u32 = 12;

/// Loyalty tier, ordered from lowest to highest.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a customer from spend and purchase recency as of `today`.
///
/// - Missing spend or missing purchase date is always `Silver`.
/// - `Platinum`: spend ≥ 10 000 and last purchase no earlier than 6 months ago.
/// - `Gold`: otherwise, spend ≥ 1 000 and last purchase no earlier than 12 months ago.
/// - `Silver` for everything else.
///
/// Month arithmetic clamps to the end of shorter months (31 Aug − 6 months is 28/29 Feb).
pub fn classify(
    annual_spend: Option<Decimal>,
    last_purchase_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Tier {
    let (Some(spend), Some(last_purchase)) = (annual_spend, last_purchase_date) else {
        return Tier::Silver;
    };

    let platinum_cutoff = months_before(today, PLATINUM_RECENCY_MONTHS);
    let gold_cutoff = months_before(today, GOLD_RECENCY_MONTHS);

    if spend >= PLATINUM_SPEND_THRESHOLD && last_purchase >= platinum_cutoff {
        Tier::Platinum
    } else if spend >= GOLD_SPEND_THRESHOLD && last_purchase >= gold_cutoff {
        Tier::Gold
    } else {
        Tier::Silver
    }
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
