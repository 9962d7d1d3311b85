use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    core::period::Period,
    quantity::{cost::Cost, energy::KilowattHours},
    store::Invoice,
};

/// Relative change in percent, positive for an increase.
///
/// `None` on a missing or zero baseline: a percentage fabricated from
/// nothing would still classify as an increase or a decrease downstream.
#[must_use]
pub fn percent_change(current: f64, previous: Option<f64>) -> Option<f64> {
    match previous {
        Some(previous) if previous != 0.0 => Some((current - previous) / previous * 100.0),
        _ => None,
    }
}

/// Apportion the invoice cost by energy share, assuming a single flat tariff
/// across the whole household.
pub fn cost_share(item: KilowattHours, total_consumption: KilowattHours, total_cost: Cost) -> Cost {
    if total_consumption <= KilowattHours::ZERO || total_cost <= Cost::ZERO {
        return Cost::ZERO;
    }
    Cost(total_cost.0 * (item.0 / total_consumption.0))
}

#[derive(Copy, Clone, Default)]
pub struct PeriodTotals {
    pub consumption: KilowattHours,
    pub cost: Cost,
}

/// Sum consumption and cost per resolved period, in first-seen order;
/// unresolvable invoices are excluded, not defaulted.
pub fn aggregate_by_period(invoices: &[Invoice]) -> IndexMap<Period, PeriodTotals> {
    let mut totals: IndexMap<Period, PeriodTotals> = IndexMap::new();
    for invoice in invoices {
        let Some(period) = invoice.period() else {
            continue;
        };
        let entry = totals.entry(period).or_default();
        entry.consumption += invoice.consumption;
        entry.cost += invoice.cost;
    }
    totals
}

/// The most recent period that has at least one resolvable invoice.
#[must_use]
pub fn latest_period(invoices: &[Invoice]) -> Option<Period> {
    aggregate_by_period(invoices).keys().copied().max()
}

/// Totals for one specific period, rounded to the display precision. `None`
/// means "no invoice for that period", which is distinct from a reported
/// zero.
#[must_use]
pub fn aggregate_for(invoices: &[Invoice], period: Period) -> Option<PeriodTotals> {
    let mut totals = PeriodTotals::default();
    let mut matched = false;
    for invoice in invoices {
        if invoice.period() == Some(period) {
            totals.consumption += invoice.consumption;
            totals.cost += invoice.cost;
            matched = true;
        }
    }
    matched.then(|| PeriodTotals {
        consumption: totals.consumption.round_to_hundredths(),
        cost: totals.cost.round_to_hundredths(),
    })
}

/// The metric-card pair: the latest period and its totals.
#[must_use]
pub fn latest_period_metrics(invoices: &[Invoice]) -> Option<(Period, PeriodTotals)> {
    let period = latest_period(invoices)?;
    aggregate_for(invoices, period).map(|totals| (period, totals))
}

/// Cost saved by the latest period relative to the one before it, in
/// percent. The sign is inverted on purpose: a cost decrease reads as
/// positive savings.
#[must_use]
pub fn savings_percent(invoices: &[Invoice]) -> Option<f64> {
    let costs = aggregate_by_period(invoices)
        .into_iter()
        .sorted_unstable_by_key(|(period, _)| *period)
        .map(|(_, totals)| totals.cost)
        .collect_vec();
    match costs.as_slice() {
        [.., previous, latest] if *previous != Cost::ZERO => {
            Some((previous.0 - latest.0) / previous.0 * 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn invoice(month: &str, consumption: f64, cost: f64) -> Invoice {
        Invoice {
            month: month.to_owned(),
            consumption: KilowattHours(consumption),
            cost: Cost(cost),
            created: None,
        }
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(50.0, Some(0.0)), None);
        assert_eq!(percent_change(50.0, None), None);
        assert_abs_diff_eq!(percent_change(0.0, Some(50.0)).unwrap(), -100.0);
        assert_abs_diff_eq!(percent_change(60.0, Some(50.0)).unwrap(), 20.0);
    }

    #[test]
    fn test_cost_share_zero_guard() {
        assert_eq!(cost_share(KilowattHours(5.0), KilowattHours::ZERO, Cost(100.0)), Cost::ZERO);
        assert_eq!(cost_share(KilowattHours(5.0), KilowattHours(100.0), Cost::ZERO), Cost::ZERO);
    }

    #[test]
    fn test_cost_share_is_proportional() {
        let share = cost_share(KilowattHours(25.0), KilowattHours(100.0), Cost(80.0));
        assert_abs_diff_eq!(share.0, 20.0);
    }

    #[test]
    fn test_latest_period_scans_resolved_periods() {
        let invoices = vec![
            invoice("2024-01", 10.0, 5.0),
            invoice("2023-12", 99.0, 9.0),
            invoice("not a month", 1.0, 1.0),
        ];
        assert_eq!(latest_period(&invoices), Some(Period { year: 2024, month: 1 }));
    }

    #[test]
    fn test_aggregate_for_is_none_without_matches() {
        let invoices = vec![invoice("2024-01", 10.0, 5.0)];
        assert!(aggregate_for(&invoices, Period { year: 2024, month: 2 }).is_none());
    }

    #[test]
    fn test_aggregate_for_sums_matching_invoices() {
        let invoices = vec![invoice("2024-01", 10.0, 5.0), invoice("2024-01", 2.5, 1.25)];
        let totals = aggregate_for(&invoices, Period { year: 2024, month: 1 }).unwrap();
        assert_abs_diff_eq!(totals.consumption.0, 12.5);
        assert_abs_diff_eq!(totals.cost.0, 6.25);
    }

    #[test]
    fn test_savings_sign_inversion() {
        let cheaper = vec![invoice("2024-01", 0.0, 100.0), invoice("2024-02", 0.0, 80.0)];
        assert_abs_diff_eq!(savings_percent(&cheaper).unwrap(), 20.0);

        let pricier = vec![invoice("2024-01", 0.0, 80.0), invoice("2024-02", 0.0, 100.0)];
        assert_abs_diff_eq!(savings_percent(&pricier).unwrap(), -25.0);
    }

    #[test]
    fn test_savings_needs_two_periods() {
        assert_eq!(savings_percent(&[invoice("2024-01", 0.0, 80.0)]), None);
        assert_eq!(savings_percent(&[]), None);
    }

    #[test]
    fn test_savings_zero_baseline() {
        let invoices = vec![invoice("2024-01", 0.0, 0.0), invoice("2024-02", 0.0, 50.0)];
        assert_eq!(savings_percent(&invoices), None);
    }
}
