pub mod equipment;
pub mod invoice;

use std::{collections::BTreeMap, fs, io::ErrorKind, path::PathBuf};

use serde::de::DeserializeOwned;

pub use self::{
    equipment::{Equipment, EquipmentField},
    invoice::{Invoice, InvoiceField},
};
use crate::prelude::*;

pub const EQUIPMENTS_KEY: &str = "ecohome_equipments_v1";
pub const INVOICES_KEY: &str = "ecohome_invoices_v1";

/// String-keyed blob store persisted as a single JSON object file, the
/// browser-profile storage the dashboard records have always lived in.
///
/// Reads never fail on data shape: a missing or corrupt blob yields an empty
/// collection. Only the storage medium itself can error.
#[must_use]
pub struct Store {
    path: PathBuf,
    blobs: BTreeMap<String, String>,
}

impl Store {
    #[instrument(skip_all)]
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!(path = %path.display(), "opening the store");
        let blobs = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|error| {
                error!(error = format!("{error:#}"), "discarding the corrupt store");
                BTreeMap::new()
            }),
            Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(Error::from(error))
                    .with_context(|| format!("failed to read the store at `{}`", path.display()));
            }
        };
        Ok(Self { path, blobs })
    }

    pub fn equipments(&self) -> Vec<Equipment> {
        decode(self.blobs.get(EQUIPMENTS_KEY))
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        decode(self.blobs.get(INVOICES_KEY))
    }

    /// Overwrite the full equipment collection; there is no partial update.
    #[instrument(skip_all, fields(n_equipments = equipments.len()))]
    pub fn set_equipments(&mut self, equipments: &[Equipment]) -> Result {
        self.set(EQUIPMENTS_KEY, serde_json::to_string(equipments)?)
    }

    /// Overwrite the full invoice collection; there is no partial update.
    #[instrument(skip_all, fields(n_invoices = invoices.len()))]
    pub fn set_invoices(&mut self, invoices: &[Invoice]) -> Result {
        self.set(INVOICES_KEY, serde_json::to_string(invoices)?)
    }

    fn set(&mut self, key: &str, blob: String) -> Result {
        self.blobs.insert(key.to_owned(), blob);
        fs::write(&self.path, serde_json::to_string_pretty(&self.blobs)?)
            .with_context(|| format!("failed to write the store at `{}`", self.path.display()))
    }
}

fn decode<T: DeserializeOwned>(blob: Option<&String>) -> Vec<T> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    serde_json::from_str(blob).unwrap_or_else(|error| {
        error!(error = format!("{error:#}"), "discarding the corrupt records");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temporary_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ecohome-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn test_missing_store_is_empty() {
        let store = Store::open(temporary_path("missing")).unwrap();
        assert!(store.equipments().is_empty());
        assert!(store.invoices().is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_empty() {
        let mut blobs = BTreeMap::new();
        blobs.insert(EQUIPMENTS_KEY.to_owned(), "not json".to_owned());
        let store = Store { path: temporary_path("corrupt"), blobs };
        assert!(store.equipments().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let path = temporary_path("round-trip");
        let equipments = vec![
            Equipment::builder()
                .name("Kettle".to_owned())
                .power(crate::quantity::measure::Measure::new("2000W"))
                .class("B".to_owned())
                .hours(crate::quantity::measure::Measure::new("0.5h"))
                .room("Kitchen".to_owned())
                .build(),
        ];

        let mut store = Store::open(&path).unwrap();
        store.set_equipments(&equipments).unwrap();

        let reloaded = Store::open(&path).unwrap();
        assert_eq!(reloaded.equipments().len(), 1);
        assert_eq!(reloaded.equipments()[0].name, "Kettle");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_legacy_blob_shape() {
        // The exact JSON the browser dashboard used to write.
        let mut blobs = BTreeMap::new();
        blobs.insert(
            INVOICES_KEY.to_owned(),
            r#"[{"month":"2024-03","consumption":210,"cost":55.3,"created":1711929600000}]"#
                .to_owned(),
        );
        let store = Store { path: temporary_path("legacy"), blobs };
        let invoices = store.invoices();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].period_label(), "2024-03");
    }
}
