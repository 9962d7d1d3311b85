use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use itertools::Itertools;

use crate::{
    core::{metrics, rooms::RoomBreakdown, series},
    prelude::*,
    statistics::DashboardStatistics,
    store::Store,
    tables::{
        build_comparison_table,
        build_room_items_table,
        build_room_table,
        build_summary_table,
        build_trend_table,
    },
};

#[derive(Parser)]
#[must_use]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub command: DashboardCommand,
}

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Monthly energy per division (the pie-chart model).
    Rooms(RoomsArgs),

    /// Twelve-month consumption and cost trend (the line-chart model).
    Trend(TrendArgs),

    /// Year-over-year consumption comparison.
    Compare(CompareArgs),

    /// The dashboard metric cards.
    Summary,
}

#[derive(Parser)]
pub struct RoomsArgs {
    /// Drill into one division.
    #[clap(long)]
    room: Option<String>,
}

#[derive(Parser)]
pub struct TrendArgs {
    /// Calendar year to chart; defaults to the most recent invoice year.
    #[clap(long)]
    year: Option<i32>,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Years to compare, at least two.
    #[clap(long = "years", value_delimiter = ',', num_args = 2..)]
    years: Vec<i32>,
}

pub fn run(store: &Store, args: &DashboardArgs) -> Result {
    let invoices = store.invoices();

    match &args.command {
        DashboardCommand::Rooms(rooms_args) => {
            let equipments = store.equipments();
            let breakdown: RoomBreakdown = equipments.iter().collect();
            let latest =
                metrics::latest_period_metrics(&invoices).map(|(_, totals)| totals);
            match &rooms_args.room {
                Some(room) => {
                    let items = breakdown
                        .items(room)
                        .with_context(|| format!("no equipment is registered in {room:?}"))?;
                    let total = breakdown.room_total(room).unwrap_or_default();
                    println!("{}", build_room_items_table(items, total, latest));
                }
                None => {
                    if breakdown.is_empty() {
                        info!("no equipment registered yet; add one to see the breakdown");
                    }
                    println!("{}", build_room_table(&breakdown, latest));
                }
            }
        }

        DashboardCommand::Trend(trend_args) => {
            let year = trend_args
                .year
                .or_else(|| series::invoice_years(&invoices).into_iter().next())
                .unwrap_or_else(|| Local::now().year());
            info!(year, "charting");
            println!("{}", build_trend_table(&series::MonthlySeries::build(&invoices, Some(year))));
        }

        DashboardCommand::Compare(compare_args) => {
            ensure!(compare_args.years.len() >= 2, "select at least two years to compare");
            let series_by_year = compare_args
                .years
                .iter()
                .map(|&year| series::year_consumption(&invoices, year))
                .collect_vec();
            println!("{}", build_comparison_table(&compare_args.years, &series_by_year));
        }

        DashboardCommand::Summary => {
            let statistics = DashboardStatistics::gather(&store.equipments(), &invoices);
            println!("{}", build_summary_table(&statistics));
        }
    }
    Ok(())
}
