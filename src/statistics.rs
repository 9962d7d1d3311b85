use std::path::Path;

use serde::Serialize;

use crate::{
    core::{metrics, rooms::RoomBreakdown},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, power::Watts},
    store::{Equipment, Invoice},
};

/// Snapshot of every dashboard aggregate, for the TOML export.
#[must_use]
#[derive(Serialize, bon::Builder)]
pub struct DashboardStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,

    pub equipment: EquipmentStatistics,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_period: Option<PeriodStatistics>,

    pub rooms: Vec<RoomStatistics>,
}

#[derive(Serialize)]
pub struct EquipmentStatistics {
    pub count: usize,

    #[serde(rename = "total_power_watts")]
    pub total_power: Watts,

    #[serde(rename = "estimated_monthly_kilowatt_hours")]
    pub estimated_monthly_energy: KilowattHours,
}

#[derive(Serialize)]
pub struct RoomStatistics {
    pub room: String,

    #[serde(rename = "monthly_kilowatt_hours")]
    pub monthly_energy: KilowattHours,
}

#[derive(Serialize)]
pub struct PeriodStatistics {
    pub period: String,

    #[serde(rename = "consumption_kilowatt_hours")]
    pub consumption: KilowattHours,

    pub cost: Cost,
}

impl DashboardStatistics {
    pub fn gather(equipments: &[Equipment], invoices: &[Invoice]) -> Self {
        let breakdown: RoomBreakdown = equipments.iter().collect();
        Self::builder()
            .equipment(EquipmentStatistics {
                count: equipments.len(),
                total_power: equipments.iter().map(Equipment::watts).sum(),
                estimated_monthly_energy: equipments
                    .iter()
                    .map(|equipment| equipment.watts().over_month(equipment.daily_hours()))
                    .sum::<KilowattHours>()
                    .round_to_hundredths(),
            })
            .rooms(
                breakdown
                    .entries()
                    .map(|(room, monthly_energy, _)| RoomStatistics {
                        room: room.to_owned(),
                        monthly_energy,
                    })
                    .collect(),
            )
            .maybe_latest_period(metrics::latest_period_metrics(invoices).map(
                |(period, totals)| PeriodStatistics {
                    period: period.to_string(),
                    consumption: totals.consumption,
                    cost: totals.cost,
                },
            ))
            .maybe_savings_percent(metrics::savings_percent(invoices))
            .build()
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result {
        let rendered = toml::to_string_pretty(self).context("failed to render the statistics")?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write the statistics to `{}`", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::measure::Measure;

    #[test]
    fn test_gather() {
        let equipments = vec![
            Equipment::builder()
                .name("Fridge".to_owned())
                .power(Measure::new("100W"))
                .class("A".to_owned())
                .hours(Measure::new("24h"))
                .room("Kitchen".to_owned())
                .build(),
        ];
        let invoices = vec![Invoice {
            month: "2024-01".to_owned(),
            consumption: KilowattHours(100.0),
            cost: Cost(30.0),
            created: None,
        }];

        let statistics = DashboardStatistics::gather(&equipments, &invoices);
        assert_eq!(statistics.equipment.count, 1);
        assert_abs_diff_eq!(statistics.equipment.total_power.0, 100.0);
        assert_abs_diff_eq!(statistics.equipment.estimated_monthly_energy.0, 72.0);
        assert_eq!(statistics.rooms.len(), 1);
        assert_eq!(statistics.latest_period.as_ref().unwrap().period, "2024-01");
        assert_eq!(statistics.savings_percent, None);

        // The snapshot must always render as TOML.
        toml::to_string_pretty(&statistics).unwrap();
    }
}
