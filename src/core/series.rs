use itertools::Itertools;

use crate::{
    core::period,
    quantity::{cost::Cost, energy::KilowattHours},
    store::Invoice,
};

pub const N_MONTHS: usize = 12;

/// The line-chart model: a fixed 12-slot month axis (index 0 = January).
///
/// Months up to the last reported one are filled (a gap before it reads as
/// zero), while trailing months are `None`, "not yet reported". Renderers
/// must keep "0 kWh reported" and "no report yet" apart.
#[must_use]
pub struct MonthlySeries {
    pub consumption: [Option<KilowattHours>; N_MONTHS],
    pub cost: [Option<Cost>; N_MONTHS],
}

impl MonthlySeries {
    pub fn build(invoices: &[Invoice], filter_year: Option<i32>) -> Self {
        let mut consumption = [KilowattHours::ZERO; N_MONTHS];
        let mut cost = [Cost::ZERO; N_MONTHS];
        let mut reported = [false; N_MONTHS];

        for invoice in invoices {
            if filter_year.is_some_and(|year| !invoice.mentions_year(year)) {
                continue;
            }
            let Some(month) = invoice.month_number() else {
                continue;
            };
            let index = (month - 1) as usize;
            consumption[index] += invoice.consumption;
            cost[index] += invoice.cost;
            reported[index] = true;
        }

        let n_reported = reported.iter().rposition(|&flag| flag).map_or(0, |index| index + 1);
        Self {
            consumption: std::array::from_fn(|index| {
                (index < n_reported).then(|| consumption[index].round_to_hundredths())
            }),
            cost: std::array::from_fn(|index| {
                (index < n_reported).then(|| cost[index].round_to_hundredths())
            }),
        }
    }
}

/// Per-month consumption of one calendar year, for the year-over-year
/// comparison. Only explicit `YYYY-MM` entries carry a year here; bare month
/// numbers are skipped.
pub fn year_consumption(invoices: &[Invoice], year: i32) -> [Option<KilowattHours>; N_MONTHS] {
    let mut consumption = [KilowattHours::ZERO; N_MONTHS];
    let mut reported = [false; N_MONTHS];
    for invoice in invoices {
        let Some(period) = period::parse_year_month(&invoice.month) else {
            continue;
        };
        if period.year != year {
            continue;
        }
        let index = (period.month - 1) as usize;
        consumption[index] += invoice.consumption;
        reported[index] = true;
    }
    let n_reported = reported.iter().rposition(|&flag| flag).map_or(0, |index| index + 1);
    std::array::from_fn(|index| {
        (index < n_reported).then(|| consumption[index].round_to_hundredths())
    })
}

/// Distinct years mentioned by the invoices, most recent first.
pub fn invoice_years(invoices: &[Invoice]) -> Vec<i32> {
    invoices
        .iter()
        .filter_map(|invoice| {
            let raw = invoice.month.trim();
            match raw.split_once('-') {
                Some((year_part, _)) => year_part.trim().parse().ok(),
                None => raw.parse().ok(),
            }
        })
        .unique()
        .sorted_unstable_by(|lhs: &i32, rhs| rhs.cmp(lhs))
        .collect()
}
