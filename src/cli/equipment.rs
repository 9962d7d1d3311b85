use clap::{Parser, Subcommand};
use enumset::EnumSet;

use crate::{
    cli::resolve_position,
    core::class::EnergyClass,
    prelude::*,
    quantity::{measure::Measure, power::Watts, time::DailyHours},
    store::{Equipment, EquipmentField, Store},
    tables::build_equipment_table,
};

#[derive(Parser)]
#[must_use]
pub struct EquipmentArgs {
    #[command(subcommand)]
    pub command: EquipmentCommand,
}

#[derive(Subcommand)]
pub enum EquipmentCommand {
    /// Register a new appliance.
    Add(AddArgs),

    /// List the registered appliances.
    List(ListArgs),

    /// Update an appliance in place.
    Edit(EditArgs),

    /// Remove an appliance.
    Remove(RemoveArgs),

    /// Reorder the list; the new order is persisted.
    Move(MoveArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// Display label.
    #[clap(long)]
    name: String,

    /// Rated power draw in watts.
    #[clap(long = "power-watts", alias = "power")]
    power: Watts,

    /// Energy-efficiency label.
    #[clap(long, value_enum)]
    class: EnergyClass,

    /// Daily usage in hours.
    #[clap(long = "hours-per-day", alias = "hours")]
    hours: DailyHours,

    /// Division the appliance lives in; leave blank for "No room".
    #[clap(long, default_value = "")]
    room: String,
}

impl AddArgs {
    fn to_equipment(&self) -> Equipment {
        Equipment::builder()
            .name(self.name.trim().to_owned())
            .power(Measure::from_magnitude(self.power.0, "W"))
            .class(self.class.to_string())
            .hours(Measure::from_magnitude(self.hours.0, "h"))
            .room(self.room.trim().to_owned())
            .build()
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Sort by a column instead of the stored order.
    #[clap(long, value_enum)]
    sort: Option<EquipmentField>,

    /// Reverse the direction.
    #[clap(long)]
    descending: bool,

    /// Only show the given energy classes.
    #[clap(long = "classes", value_delimiter = ',', num_args = 1..)]
    classes: Vec<EnergyClass>,
}

impl ListArgs {
    #[must_use]
    fn classes(&self) -> EnumSet<EnergyClass> {
        self.classes.iter().copied().collect()
    }
}

#[derive(Parser)]
pub struct EditArgs {
    /// Position in the stored list, as printed in the first list column.
    #[clap(long)]
    position: usize,

    #[clap(long)]
    name: Option<String>,

    #[clap(long = "power-watts", alias = "power")]
    power: Option<Watts>,

    #[clap(long, value_enum)]
    class: Option<EnergyClass>,

    #[clap(long = "hours-per-day", alias = "hours")]
    hours: Option<DailyHours>,

    #[clap(long)]
    room: Option<String>,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Position in the stored list, as printed in the first list column.
    #[clap(long)]
    position: usize,
}

#[derive(Parser)]
pub struct MoveArgs {
    /// Position of the appliance to move.
    #[clap(long)]
    from: usize,

    /// Position it should end up at.
    #[clap(long)]
    to: usize,
}

pub fn run(store: &mut Store, args: &EquipmentArgs) -> Result {
    match &args.command {
        EquipmentCommand::Add(args) => {
            ensure!(!args.name.trim().is_empty(), "the equipment name must not be empty");
            let mut equipments = store.equipments();
            equipments.push(args.to_equipment());
            store.set_equipments(&equipments)?;
            info!(n_equipments = equipments.len(), "added");
        }

        EquipmentCommand::List(args) => {
            let classes = args.classes();
            let mut rows: Vec<(usize, Equipment)> = store
                .equipments()
                .into_iter()
                .enumerate()
                .filter(|(_, equipment)| {
                    classes.is_empty()
                        || equipment.energy_class().is_some_and(|class| classes.contains(class))
                })
                .collect();
            if let Some(field) = args.sort {
                rows.sort_by(|(_, lhs), (_, rhs)| field.compare(lhs, rhs));
            }
            if args.descending {
                rows.reverse();
            }
            println!("{}", build_equipment_table(&rows));
        }

        EquipmentCommand::Edit(args) => {
            let mut equipments = store.equipments();
            let index = resolve_position(args.position, equipments.len())?;
            let equipment = &mut equipments[index];
            if let Some(name) = &args.name {
                ensure!(!name.trim().is_empty(), "the equipment name must not be empty");
                equipment.name = name.trim().to_owned();
            }
            if let Some(power) = args.power {
                equipment.power = Measure::from_magnitude(power.0, "W");
            }
            if let Some(class) = args.class {
                equipment.class = class.to_string();
            }
            if let Some(hours) = args.hours {
                equipment.hours = Measure::from_magnitude(hours.0, "h");
            }
            if let Some(room) = &args.room {
                equipment.room = room.trim().to_owned();
            }
            store.set_equipments(&equipments)?;
        }

        EquipmentCommand::Remove(args) => {
            let mut equipments = store.equipments();
            let index = resolve_position(args.position, equipments.len())?;
            equipments.remove(index);
            store.set_equipments(&equipments)?;
        }

        EquipmentCommand::Move(args) => {
            let mut equipments = store.equipments();
            let from = resolve_position(args.from, equipments.len())?;
            let to = resolve_position(args.to, equipments.len())?;
            let equipment = equipments.remove(from);
            equipments.insert(to, equipment);
            store.set_equipments(&equipments)?;
        }
    }
    Ok(())
}
