use indexmap::IndexMap;

use crate::{
    quantity::{energy::KilowattHours, power::Watts, time::DailyHours},
    store::Equipment,
};

/// Sentinel category for equipments without a division.
pub const NO_ROOM: &str = "No room";

/// The pie-chart model: monthly energy per division, with the per-equipment
/// breakdown behind each slice. Label order is first-seen order, not
/// alphabetical.
#[must_use]
#[derive(Default)]
pub struct RoomBreakdown {
    rooms: IndexMap<String, RoomEntry>,
}

#[derive(Default)]
struct RoomEntry {
    total: KilowattHours,
    items: Vec<RoomItem>,
}

/// One equipment's contribution to its division.
#[derive(Clone)]
pub struct RoomItem {
    pub name: String,
    pub power: Watts,
    pub daily_hours: DailyHours,
    pub monthly_energy: KilowattHours,
}

impl<'a> FromIterator<&'a Equipment> for RoomBreakdown {
    fn from_iter<T: IntoIterator<Item = &'a Equipment>>(equipments: T) -> Self {
        let mut rooms: IndexMap<String, RoomEntry> = IndexMap::new();
        for equipment in equipments {
            // Rounded per item; the room total is rounded again on read.
            let monthly_energy = equipment.monthly_energy();
            let entry = rooms.entry(equipment.room_label().to_owned()).or_default();
            entry.total += monthly_energy;
            entry.items.push(RoomItem {
                name: equipment.display_name().to_owned(),
                power: equipment.watts(),
                daily_hours: equipment.daily_hours(),
                monthly_energy,
            });
        }
        Self { rooms }
    }
}

impl RoomBreakdown {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// `(label, rounded total, items)` per division, in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, KilowattHours, &[RoomItem])> {
        self.rooms.iter().map(|(label, entry)| {
            (label.as_str(), entry.total.round_to_hundredths(), entry.items.as_slice())
        })
    }

    pub fn items(&self, room: &str) -> Option<&[RoomItem]> {
        self.rooms.get(room).map(|entry| entry.items.as_slice())
    }

    pub fn room_total(&self, room: &str) -> Option<KilowattHours> {
        self.rooms.get(room).map(|entry| entry.total.round_to_hundredths())
    }

    pub fn grand_total(&self) -> KilowattHours {
        self.rooms.values().map(|entry| entry.total.round_to_hundredths()).sum()
    }
}
