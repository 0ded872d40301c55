//! Office assets and their maintenance history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use infoco_core::{Collection, DomainError, DomainResult, IdGenerator, RecordId, RecordRules, Required};
use infoco_records::EntityStore;

use crate::period::today;

labelled_enum! {
    pub enum AssetStatus {
        InUse => "Em Uso",
        UnderMaintenance => "Em Manutenção",
        Damaged => "Danificado",
        Discarded => "Descartado",
    }
}

/// One entry of an asset's maintenance log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    pub cost: f64,
}

/// Maintenance entry as submitted, before it gets an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntry {
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
}

impl MaintenanceEntry {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.description.is_blank() {
            missing.push("description");
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            missing.push("cost");
        }
        missing
    }
}

infoco_core::record! {
    pub struct Asset / AssetDraft in Collection::Assets {
        req name: String,
        req purchase_date: NaiveDate,
        req purchase_value: f64,
        req location: String,
        req status: AssetStatus,
        opt description: String,
        opt assigned_to_employee_id: Option<RecordId>,
        opt maintenance_log: Vec<MaintenanceRecord>,
    }
    defaults {
        purchase_date: Some(today()),
        status: Some(AssetStatus::InUse)
    }
}

impl RecordRules for Asset {
    fn on_insert(&mut self) {
        self.maintenance_log.clear();
    }

    fn validate(&self) -> DomainResult<()> {
        if self.purchase_value < 0.0 {
            return Err(DomainError::invalid_field("purchase_value"));
        }
        Ok(())
    }

    /// The log is only written through [`add_maintenance_record`].
    fn merge_update(previous: &Self, mut next: Self) -> Self {
        next.maintenance_log = previous.maintenance_log.clone();
        next
    }
}

impl Asset {
    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance_log.iter().map(|m| m.cost).sum()
    }
}

/// Append `entry` to the asset's log with an id unique within that log.
pub fn add_maintenance_record(
    assets: &mut EntityStore<Asset>,
    asset_id: RecordId,
    entry: MaintenanceEntry,
) -> DomainResult<RecordId> {
    let missing = entry.missing_fields();
    if !missing.is_empty() {
        return Err(DomainError::validation(missing));
    }
    let mut created = RecordId::new(0);
    assets.modify(asset_id, |asset| {
        let mut ids = IdGenerator::seeded(asset.maintenance_log.iter().map(|m| m.id));
        created = ids.next_id();
        asset.maintenance_log.push(MaintenanceRecord {
            id: created,
            date: entry.date,
            description: entry.description,
            cost: entry.cost,
        });
    })?;
    Ok(created)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub total_value: f64,
    pub total_items: usize,
}

impl AssetSummary {
    pub fn compute(assets: &[Asset]) -> Self {
        Self {
            total_value: assets.iter().map(|a| a.purchase_value).sum(),
            total_items: assets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::Record;

    use super::*;

    fn notebook() -> AssetDraft {
        let mut d = Asset::new_draft();
        d.name = Some("Notebook Dell".into());
        d.purchase_value = Some(4500.0);
        d.location = Some("Sala 2".into());
        d.maintenance_log = vec![MaintenanceRecord {
            id: RecordId::new(9),
            date: today(),
            description: "forjado".into(),
            cost: 1.0,
        }];
        d
    }

    fn entry(description: &str, cost: f64) -> MaintenanceEntry {
        MaintenanceEntry {
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            description: description.into(),
            cost,
        }
    }

    #[test]
    fn assets_start_with_an_empty_log() {
        let mut store = EntityStore::<Asset>::new();
        let id = store.table().submit(notebook()).unwrap().id();
        assert!(store.get(id).unwrap().maintenance_log.is_empty());
        assert_eq!(store.get(id).unwrap().status, AssetStatus::InUse);
    }

    #[test]
    fn maintenance_is_appended_with_fresh_ids_and_survives_edits() {
        let mut store = EntityStore::<Asset>::new();
        let id = store.table().submit(notebook()).unwrap().id();

        let first = add_maintenance_record(&mut store, id, entry("Troca de bateria", 350.0)).unwrap();
        let second = add_maintenance_record(&mut store, id, entry("Limpeza", 80.0)).unwrap();
        assert_ne!(first, second);

        let mut edit = store.table().begin_edit(id).unwrap();
        edit.maintenance_log.clear();
        edit.location = Some("Sala 3".into());
        store.table().submit(edit).unwrap();

        let asset = store.get(id).unwrap();
        assert_eq!(asset.location, "Sala 3");
        assert_eq!(asset.maintenance_log.len(), 2);
        assert_eq!(asset.maintenance_cost(), 430.0);
    }

    #[test]
    fn maintenance_needs_a_description() {
        let mut store = EntityStore::<Asset>::new();
        let id = store.table().submit(notebook()).unwrap().id();
        let err = add_maintenance_record(&mut store, id, entry(" ", 10.0)).unwrap_err();
        assert_eq!(err.fields(), &["description"]);

        let err = add_maintenance_record(&mut store, RecordId::new(77), entry("x", 1.0)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn summary_adds_purchase_values() {
        let mut store = EntityStore::<Asset>::new();
        store.table().submit(notebook()).unwrap();
        store.table().submit(notebook()).unwrap();
        let s = AssetSummary::compute(store.list());
        assert_eq!(s.total_items, 2);
        assert_eq!(s.total_value, 9000.0);
    }
}
