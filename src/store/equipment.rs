use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    core::{class::EnergyClass, rooms::NO_ROOM},
    quantity::{energy::KilowattHours, measure::Measure, power::Watts, time::DailyHours},
};

/// A registered appliance, exactly as persisted: loose strings in, typed
/// accessors out. The list position is the only identity; reordering is a
/// first-class operation.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize, Serialize, bon::Builder)]
#[serde(default)]
pub struct Equipment {
    pub name: String,
    pub power: Measure,
    pub class: String,
    pub hours: Measure,
    pub room: String,
}

impl Equipment {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Unnamed" } else { &self.name }
    }

    /// Division label; blank normalizes to the sentinel category.
    #[must_use]
    pub fn room_label(&self) -> &str {
        let room = self.room.trim();
        if room.is_empty() { NO_ROOM } else { room }
    }

    pub fn watts(&self) -> Watts {
        Watts(self.power.magnitude())
    }

    pub fn daily_hours(&self) -> DailyHours {
        DailyHours(self.hours.magnitude())
    }

    /// Estimated 30-day energy, rounded to the display precision.
    pub fn monthly_energy(&self) -> KilowattHours {
        self.watts().over_month(self.daily_hours()).round_to_hundredths()
    }

    #[must_use]
    pub fn energy_class(&self) -> Option<EnergyClass> {
        EnergyClass::parse_label(&self.class)
    }

    fn class_rank(&self) -> usize {
        self.energy_class().map_or(EnergyClass::UNKNOWN_RANK, EnergyClass::rank)
    }
}

/// Sortable columns of the equipment list.
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum EquipmentField {
    Name,
    Power,
    Class,
    Hours,
    Room,
}

impl EquipmentField {
    #[must_use]
    pub fn compare(self, lhs: &Equipment, rhs: &Equipment) -> Ordering {
        match self {
            Self::Name => compare_text(&lhs.name, &rhs.name),
            Self::Power => {
                OrderedFloat(lhs.power.magnitude()).cmp(&OrderedFloat(rhs.power.magnitude()))
            }
            Self::Class => lhs.class_rank().cmp(&rhs.class_rank()),
            Self::Hours => {
                OrderedFloat(lhs.hours.magnitude()).cmp(&OrderedFloat(rhs.hours.magnitude()))
            }
            Self::Room => compare_text(&lhs.room, &rhs.room),
        }
    }
}

fn compare_text(lhs: &str, rhs: &str) -> Ordering {
    lhs.to_lowercase().cmp(&rhs.to_lowercase())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_monthly_energy() {
        let equipment = Equipment::builder()
            .name("Fridge".to_owned())
            .power(Measure::new("100W"))
            .class("A+".to_owned())
            .hours(Measure::new("2h"))
            .room("Kitchen".to_owned())
            .build();
        assert_abs_diff_eq!(equipment.monthly_energy().0, 6.0);
    }

    #[test]
    fn test_display_name_fallback() {
        let equipment = Equipment { name: String::new(), ..Equipment::default() };
        assert_eq!(equipment.display_name(), "Unnamed");
    }

    #[test]
    fn test_room_label_sentinel() {
        let blank = Equipment { room: String::new(), ..Equipment::default() };
        let whitespace = Equipment { room: "  ".to_owned(), ..Equipment::default() };
        assert_eq!(blank.room_label(), NO_ROOM);
        assert_eq!(whitespace.room_label(), NO_ROOM);
    }

    #[test]
    fn test_unknown_class_sorts_last() {
        let known = Equipment { class: "G".to_owned(), ..Equipment::default() };
        let unknown = Equipment { class: "???".to_owned(), ..Equipment::default() };
        assert_eq!(EquipmentField::Class.compare(&known, &unknown), Ordering::Less);
    }

    #[test]
    fn test_stored_shape_round_trips() {
        let blob = r#"{"name":"Washer","power":"800W","class":"B","hours":"1.5h","room":"Laundry"}"#;
        let equipment: Equipment = serde_json::from_str(blob).unwrap();
        assert_abs_diff_eq!(equipment.watts().0, 800.0);
        assert_eq!(serde_json::to_string(&equipment).unwrap(), blob);
    }
}
