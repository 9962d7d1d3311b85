pub mod dashboard;
pub mod equipment;
pub mod invoice;
pub mod statistics;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use self::{
    dashboard::DashboardArgs,
    equipment::EquipmentArgs,
    invoice::InvoiceArgs,
    statistics::StatisticsArgs,
};
use crate::{prelude::*, store::Store};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser)]
pub struct StoreArgs {
    /// Path of the JSON blob store holding the dashboard records.
    #[clap(long = "store-path", env = "ECOHOME_STORE_PATH", default_value = "ecohome.json")]
    path: PathBuf,
}

impl StoreArgs {
    pub fn open(&self) -> Result<Store> {
        Store::open(&self.path)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the registered appliances.
    #[clap(name = "equipment")]
    Equipment(Box<EquipmentArgs>),

    /// Manage the monthly utility invoices.
    #[clap(name = "invoice")]
    Invoice(Box<InvoiceArgs>),

    /// Render the consumption charts and metric cards.
    #[clap(name = "dashboard")]
    Dashboard(Box<DashboardArgs>),

    /// Export every dashboard aggregate to a TOML file.
    #[clap(name = "statistics")]
    Statistics(Box<StatisticsArgs>),
}

/// Resolve a 1-based list position, as printed in the first list column, to
/// the storage index it addresses.
fn resolve_position(position: usize, len: usize) -> Result<usize> {
    ensure!(
        (1..=len).contains(&position),
        "position {position} is out of range (the list holds {len} records)"
    );
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_position() {
        assert_eq!(resolve_position(1, 3).unwrap(), 0);
        assert_eq!(resolve_position(3, 3).unwrap(), 2);
        assert!(resolve_position(0, 3).is_err());
        assert!(resolve_position(4, 3).is_err());
        assert!(resolve_position(1, 0).is_err());
    }
}
