use std::path::PathBuf;

use clap::Parser;

use crate::{prelude::*, statistics::DashboardStatistics, store::Store};

#[derive(Parser)]
#[must_use]
pub struct StatisticsArgs {
    /// Where to write the TOML snapshot.
    #[clap(long, env = "STATISTICS_PATH", default_value = "statistics.toml")]
    output_file: PathBuf,
}

pub fn run(store: &Store, args: &StatisticsArgs) -> Result {
    DashboardStatistics::gather(&store.equipments(), &store.invoices())
        .write_to(&args.output_file)
}
