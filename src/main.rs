#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod prelude;
mod quantity;
mod statistics;
mod store;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let mut store = args.store.open()?;

    match &args.command {
        Command::Equipment(equipment_args) => cli::equipment::run(&mut store, equipment_args)?,
        Command::Invoice(invoice_args) => cli::invoice::run(&mut store, invoice_args)?,
        Command::Dashboard(dashboard_args) => cli::dashboard::run(&store, dashboard_args)?,
        Command::Statistics(statistics_args) => cli::statistics::run(&store, statistics_args)?,
    }

    info!("done!");
    Ok(())
}
