use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        metrics::{self, PeriodTotals},
        palette,
        rooms::{RoomBreakdown, RoomItem},
        series::{MonthlySeries, N_MONTHS},
    },
    quantity::{cost::Cost, energy::KilowattHours},
    statistics::DashboardStatistics,
    store::{Equipment, Invoice},
};

const MONTH_NAMES: [&str; N_MONTHS] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn styled() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn swatch(color: &str) -> Cell {
    palette::to_rgb(color)
        .map_or_else(|| Cell::new(" "), |(r, g, b)| Cell::new("●").fg(Color::Rgb { r, g, b }))
}

/// Month-over-month change: red for an increase, green for a decrease.
fn change_cell(change: Option<f64>) -> Cell {
    match change {
        None => Cell::new("n/a").add_attribute(Attribute::Dim),
        Some(change) => Cell::new(format!("{change:+.2}%")).fg(if change > 0.0 {
            Color::Red
        } else if change < 0.0 {
            Color::Green
        } else {
            Color::Reset
        }),
    }
}

fn missing_cell() -> Cell {
    Cell::new("—").add_attribute(Attribute::Dim)
}

#[must_use]
pub fn build_equipment_table(equipments: &[(usize, Equipment)]) -> Table {
    let mut table = styled();
    table.set_header(vec!["#", "Name", "Power", "Class", "Hours/day", "Room"]);
    for (position, equipment) in equipments {
        let class_cell = equipment.energy_class().map_or_else(
            || Cell::new(&equipment.class).add_attribute(Attribute::Dim),
            |class| Cell::new(class).fg(class.color()).add_attribute(Attribute::Bold),
        );
        table.add_row(vec![
            Cell::new(position + 1).add_attribute(Attribute::Dim),
            Cell::new(equipment.display_name()),
            Cell::new(equipment.power.raw()).set_alignment(CellAlignment::Right),
            class_cell,
            Cell::new(equipment.hours.raw()).set_alignment(CellAlignment::Right),
            Cell::new(equipment.room_label()),
        ]);
    }
    table
}

#[must_use]
pub fn build_invoice_table(invoices: &[(usize, Invoice)]) -> Table {
    let mut table = styled();
    table.set_header(vec!["#", "Period", "Consumption", "Cost"]);
    for (position, invoice) in invoices {
        table.add_row(vec![
            Cell::new(position + 1).add_attribute(Attribute::Dim),
            Cell::new(invoice.period_label()),
            Cell::new(invoice.consumption).set_alignment(CellAlignment::Right),
            Cell::new(invoice.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_room_table(breakdown: &RoomBreakdown, latest: Option<PeriodTotals>) -> Table {
    let mut table = styled();
    table.set_header(vec!["", "Room", "Monthly energy", "Share", "Cost share"]);
    let colors = palette::colors_for(breakdown.len());
    let grand_total = breakdown.grand_total();
    for (index, (room, total, _)) in breakdown.entries().enumerate() {
        let share = if grand_total > KilowattHours::ZERO {
            total.0 / grand_total.0 * 100.0
        } else {
            0.0
        };
        let cost_cell = latest.map_or_else(missing_cell, |totals| {
            Cell::new(metrics::cost_share(total, totals.consumption, totals.cost))
                .set_alignment(CellAlignment::Right)
        });
        table.add_row(vec![
            swatch(&colors[index]),
            Cell::new(room),
            Cell::new(total).set_alignment(CellAlignment::Right),
            Cell::new(format!("{share:.1}%")).set_alignment(CellAlignment::Right),
            cost_cell,
        ]);
    }
    table
}

/// The drill-down behind one pie slice: the division's equipments with their
/// share of the division and their slice of the latest invoice.
#[must_use]
pub fn build_room_items_table(
    items: &[RoomItem],
    room_total: KilowattHours,
    latest: Option<PeriodTotals>,
) -> Table {
    let mut table = styled();
    table.set_header(vec!["Equipment", "Monthly energy", "Room share", "Cost share", "Specs"]);
    for item in items {
        let share = if room_total > KilowattHours::ZERO {
            item.monthly_energy.0 / room_total.0 * 100.0
        } else {
            0.0
        };
        let cost_share = latest.map_or(Cost::ZERO, |totals| {
            metrics::cost_share(item.monthly_energy, totals.consumption, totals.cost)
        });
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(item.monthly_energy).set_alignment(CellAlignment::Right),
            Cell::new(format!("{share:.1}%")).set_alignment(CellAlignment::Right),
            Cell::new(cost_share).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} • {}", item.power, item.daily_hours))
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[must_use]
pub fn build_trend_table(series: &MonthlySeries) -> Table {
    let mut table = styled();
    table.set_header(vec!["Month", "Consumption", "Δ", "Cost", "Δ"]);
    for month in 0..N_MONTHS {
        let consumption = series.consumption[month];
        let cost = series.cost[month];
        let previous_consumption =
            month.checked_sub(1).and_then(|index| series.consumption[index]).map(|value| value.0);
        let previous_cost =
            month.checked_sub(1).and_then(|index| series.cost[index]).map(|value| value.0);
        table.add_row(vec![
            Cell::new(MONTH_NAMES[month]),
            consumption
                .map_or_else(missing_cell, Cell::new)
                .set_alignment(CellAlignment::Right),
            change_cell(
                consumption
                    .and_then(|value| metrics::percent_change(value.0, previous_consumption)),
            ),
            cost.map_or_else(missing_cell, Cell::new).set_alignment(CellAlignment::Right),
            change_cell(cost.and_then(|value| metrics::percent_change(value.0, previous_cost))),
        ]);
    }
    table
}

/// Year-over-year comparison: one consumption column per year, plus the
/// difference of every later year against the first.
#[must_use]
pub fn build_comparison_table(
    years: &[i32],
    series_by_year: &[[Option<KilowattHours>; N_MONTHS]],
) -> Table {
    let colors = palette::colors_for(years.len());
    let mut table = styled();

    let mut header = vec![Cell::new("Month")];
    for (year, color) in years.iter().zip(&colors) {
        let cell = Cell::new(year).add_attribute(Attribute::Bold);
        header.push(palette::to_rgb(color).map_or(cell.clone(), |(r, g, b)| cell.fg(Color::Rgb { r, g, b })));
    }
    for year in &years[1..] {
        header.push(Cell::new(format!("{year} vs {}", years[0])));
    }
    table.set_header(header);

    for month in 0..N_MONTHS {
        let mut row = vec![Cell::new(MONTH_NAMES[month])];
        for series in series_by_year {
            row.push(
                series[month].map_or_else(missing_cell, Cell::new).set_alignment(CellAlignment::Right),
            );
        }
        let base = series_by_year[0][month];
        for (series, color) in series_by_year[1..].iter().zip(&colors[1..]) {
            row.push(diff_cell(base, series[month], &palette::darken(color, 0.2)));
        }
        table.add_row(row);
    }
    table
}

fn diff_cell(base: Option<KilowattHours>, other: Option<KilowattHours>, color: &str) -> Cell {
    let Some(base) = base else {
        return missing_cell();
    };
    // A month the other year has not reported compares as zero.
    let other = other.unwrap_or(KilowattHours::ZERO);
    let difference = (other - base).round_to_hundredths();
    let percent = metrics::percent_change(other.0, Some(base.0).filter(|value| *value != 0.0));
    let label = percent.map_or_else(
        || format!("{difference:+.2} kWh (n/a)", difference = difference.0),
        |percent| format!("{difference:+.2} kWh ({percent:.2}%)", difference = difference.0),
    );
    let cell = Cell::new(label).set_alignment(CellAlignment::Right);
    palette::to_rgb(color).map_or(cell.clone(), |(r, g, b)| cell.fg(Color::Rgb { r, g, b }))
}

#[must_use]
pub fn build_summary_table(statistics: &DashboardStatistics) -> Table {
    let mut table = styled();
    table.set_header(vec!["Metric", "Value"]);

    let (latest_consumption, latest_cost, latest_period) = statistics.latest_period.as_ref().map_or(
        (missing_cell(), missing_cell(), missing_cell()),
        |latest| {
            (
                Cell::new(latest.consumption),
                Cell::new(latest.cost),
                Cell::new(&latest.period),
            )
        },
    );
    let savings = statistics.savings_percent.map_or_else(missing_cell, |savings| {
        Cell::new(format!("{savings:+.2}%")).fg(if savings > 0.0 {
            Color::Green
        } else if savings < 0.0 {
            Color::Red
        } else {
            Color::Reset
        })
    });

    table.add_row(vec![Cell::new("Latest period"), latest_period]);
    table.add_row(vec![Cell::new("Latest consumption"), latest_consumption]);
    table.add_row(vec![Cell::new("Latest cost"), latest_cost]);
    table.add_row(vec![Cell::new("Savings vs previous period"), savings]);
    table.add_row(vec![
        Cell::new("Registered equipments"),
        Cell::new(statistics.equipment.count),
    ]);
    table.add_row(vec![
        Cell::new("Total connected load"),
        Cell::new(statistics.equipment.total_power),
    ]);
    table.add_row(vec![
        Cell::new("Estimated monthly energy"),
        Cell::new(statistics.equipment.estimated_monthly_energy),
    ]);
    table
}
