use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::serde_as;

use crate::{
    core::period::{self, Period},
    quantity::{cost::Cost, energy::KilowattHours, measure},
};

/// A monthly utility invoice, exactly as persisted. The `month` field is
/// either an explicit `YYYY-MM` or a bare month number (legacy entries).
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, bon::Builder)]
#[serde(default)]
pub struct Invoice {
    pub month: String,

    #[serde(deserialize_with = "lenient_kilowatt_hours")]
    pub consumption: KilowattHours,

    #[serde(deserialize_with = "lenient_cost")]
    pub cost: Cost,

    #[serde_as(as = "Option<serde_with::TimestampMilliSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Local>>,
}

impl Invoice {
    /// Resolve the billing period: explicit `YYYY-MM` first, the creation
    /// timestamp's calendar month as a fallback, unresolved otherwise.
    pub fn period(&self) -> Option<Period> {
        period::parse_year_month(&self.month).or_else(|| self.created.map(Period::from))
    }

    /// The slot this invoice projects onto the fixed 12-month axis: explicit
    /// periods contribute their month part, legacy entries their bare number.
    pub fn month_number(&self) -> Option<u32> {
        let mut parts = self.month.trim().split('-');
        let first = parts.next()?;
        let candidate = parts.next().unwrap_or(first);
        candidate.trim().parse().ok().filter(|month| (1..=12).contains(month))
    }

    /// Whether the `month` field mentions the given calendar year.
    #[must_use]
    pub fn mentions_year(&self, year: i32) -> bool {
        let raw = self.month.trim();
        if raw.is_empty() {
            return false;
        }
        match raw.split_once('-') {
            Some((year_part, _)) => year_part.trim().parse() == Ok(year),
            None => raw.parse() == Ok(year),
        }
    }

    /// Display form of the billing month: the resolved period when there is
    /// one, the raw field otherwise.
    #[must_use]
    pub fn period_label(&self) -> String {
        self.period().map_or_else(
            || if self.month.is_empty() { "-".to_owned() } else { self.month.clone() },
            |period| period.to_string(),
        )
    }

    fn period_score(&self) -> i64 {
        self.period().map_or(0, |period| i64::from(period.sort_key()))
    }
}

/// Sortable columns of the invoice list.
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum InvoiceField {
    Month,
    Consumption,
    Cost,
}

impl InvoiceField {
    #[must_use]
    pub fn compare(self, lhs: &Invoice, rhs: &Invoice) -> Ordering {
        match self {
            Self::Month => lhs.period_score().cmp(&rhs.period_score()),
            Self::Consumption => lhs.consumption.cmp(&rhs.consumption),
            Self::Cost => lhs.cost.cmp(&rhs.cost),
        }
    }
}

fn lenient_kilowatt_hours<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<KilowattHours, D::Error> {
    lenient_amount(deserializer).map(KilowattHours)
}

fn lenient_cost<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cost, D::Error> {
    lenient_amount(deserializer).map(Cost)
}

/// Invoice amounts must coerce to a non-negative float; anything else
/// contributes zero rather than failing the whole collection.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let amount = match Raw::deserialize(deserializer)? {
        Raw::Number(number) => number,
        Raw::Text(text) => measure::lenient_magnitude(&text),
        Raw::Other(_) => 0.0,
    };
    Ok(if amount.is_finite() { amount.max(0.0) } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;

    fn invoice(month: &str) -> Invoice {
        Invoice { month: month.to_owned(), ..Invoice::default() }
    }

    #[test]
    fn test_period_prefers_explicit_month() {
        let created = Local.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let invoice =
            Invoice { month: "2024-03".to_owned(), created: Some(created), ..Invoice::default() };
        assert_eq!(invoice.period(), Some(Period { year: 2024, month: 3 }));
    }

    #[test]
    fn test_period_falls_back_to_created() {
        let created = Local.with_ymd_and_hms(2023, 7, 15, 12, 0, 0).unwrap();
        let invoice = Invoice { created: Some(created), ..Invoice::default() };
        assert_eq!(invoice.period(), Some(Period { year: 2023, month: 7 }));
    }

    #[test]
    fn test_period_unresolved() {
        assert_eq!(invoice("7").period(), None);
        assert_eq!(invoice("").period(), None);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(invoice("2024-03").month_number(), Some(3));
        assert_eq!(invoice("7").month_number(), Some(7));
        assert_eq!(invoice("13").month_number(), None);
        assert_eq!(invoice("").month_number(), None);
    }

    #[test]
    fn test_mentions_year() {
        assert!(invoice("2024-03").mentions_year(2024));
        assert!(!invoice("2023-03").mentions_year(2024));
        assert!(!invoice("3").mentions_year(2024));
        assert!(invoice("2024").mentions_year(2024));
    }

    #[test]
    fn test_lenient_amounts() {
        let parsed: Invoice =
            serde_json::from_str(r#"{"month":"2024-01","consumption":"120kWh","cost":null}"#)
                .unwrap();
        assert_abs_diff_eq!(parsed.consumption.0, 120.0);
        assert_abs_diff_eq!(parsed.cost.0, 0.0);

        let negative: Invoice =
            serde_json::from_str(r#"{"month":"2024-01","consumption":-5,"cost":12.5}"#).unwrap();
        assert_abs_diff_eq!(negative.consumption.0, 0.0);
        assert_abs_diff_eq!(negative.cost.0, 12.5);
    }

    #[test]
    fn test_created_round_trips_as_millis() {
        let blob = r#"{"month":"2024-01","consumption":10.0,"cost":5.0,"created":1704067200000}"#;
        let invoice: Invoice = serde_json::from_str(blob).unwrap();
        assert_eq!(invoice.created.unwrap().timestamp_millis(), 1_704_067_200_000);
        let rendered = serde_json::to_string(&invoice).unwrap();
        assert!(rendered.contains("1704067200000"), "{rendered}");
    }

    #[test]
    fn test_month_sort_falls_back_for_unresolved() {
        let resolved = invoice("2024-01");
        let unresolved = invoice("7");
        assert_eq!(InvoiceField::Month.compare(&unresolved, &resolved), Ordering::Less);
    }
}
