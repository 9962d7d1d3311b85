use chrono::Local;
use clap::{Parser, Subcommand};

use crate::{
    cli::resolve_position,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
    store::{Invoice, InvoiceField, Store},
    tables::build_invoice_table,
};

#[derive(Parser)]
#[must_use]
pub struct InvoiceArgs {
    #[command(subcommand)]
    pub command: InvoiceCommand,
}

#[derive(Subcommand)]
pub enum InvoiceCommand {
    /// Record a new invoice.
    Add(AddArgs),

    /// List the recorded invoices.
    List(ListArgs),

    /// Replace an invoice in place; its creation timestamp is kept.
    Edit(EditArgs),

    /// Remove an invoice.
    Remove(RemoveArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// Billing month, either `YYYY-MM` or a bare month number.
    #[clap(long)]
    month: String,

    /// Billed energy in kilowatt-hours.
    #[clap(long = "consumption-kwh", alias = "consumption")]
    consumption: KilowattHours,

    /// Billed amount.
    #[clap(long)]
    cost: Cost,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Sort by a column instead of the stored order.
    #[clap(long, value_enum)]
    sort: Option<InvoiceField>,

    /// Reverse the direction.
    #[clap(long)]
    descending: bool,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Position in the stored list, as printed in the first list column.
    #[clap(long)]
    position: usize,

    #[clap(long)]
    month: Option<String>,

    #[clap(long = "consumption-kwh", alias = "consumption")]
    consumption: Option<KilowattHours>,

    #[clap(long)]
    cost: Option<Cost>,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Position in the stored list, as printed in the first list column.
    #[clap(long)]
    position: usize,
}

pub fn run(store: &mut Store, args: &InvoiceArgs) -> Result {
    match &args.command {
        InvoiceCommand::Add(args) => {
            let mut invoices = store.invoices();
            invoices.push(
                Invoice::builder()
                    .month(args.month.trim().to_owned())
                    .consumption(args.consumption)
                    .cost(args.cost)
                    .created(Local::now())
                    .build(),
            );
            store.set_invoices(&invoices)?;
            info!(n_invoices = invoices.len(), "added");
        }

        InvoiceCommand::List(args) => {
            let mut rows: Vec<(usize, Invoice)> =
                store.invoices().into_iter().enumerate().collect();
            if let Some(field) = args.sort {
                rows.sort_by(|(_, lhs), (_, rhs)| field.compare(lhs, rhs));
            }
            if args.descending {
                rows.reverse();
            }
            println!("{}", build_invoice_table(&rows));
        }

        InvoiceCommand::Edit(args) => {
            let mut invoices = store.invoices();
            let index = resolve_position(args.position, invoices.len())?;
            let invoice = &mut invoices[index];
            if let Some(month) = &args.month {
                invoice.month = month.trim().to_owned();
            }
            if let Some(consumption) = args.consumption {
                invoice.consumption = consumption;
            }
            if let Some(cost) = args.cost {
                invoice.cost = cost;
            }
            // Legacy rows may predate the timestamp; stamp them on first edit.
            if invoice.created.is_none() {
                invoice.created = Some(Local::now());
            }
            store.set_invoices(&invoices)?;
        }

        InvoiceCommand::Remove(args) => {
            let mut invoices = store.invoices();
            let index = resolve_position(args.position, invoices.len())?;
            invoices.remove(index);
            store.set_invoices(&invoices)?;
        }
    }
    Ok(())
}
