//! Health condition pages.

use anyhow::Context;

use optodesk_core::history::filter_health_data;
use optodesk_core::models::HealthDataRecord;
use optodesk_core::{Database, Stored};

use super::finish;
use crate::table::{RowTable, TableResult};
use crate::toast::Toaster;

/// "Add Health Data" form: a list of conditions, never fewer than one row.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthDataForm {
    conditions: RowTable<String>,
}

impl Default for HealthDataForm {
    fn default() -> Self {
        Self {
            conditions: RowTable::with_min_rows(1),
        }
    }
}

impl HealthDataForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conditions(&self) -> &[String] {
        self.conditions.rows()
    }

    pub fn add_row(&mut self) -> usize {
        self.conditions.add_row()
    }

    pub fn update_row(&mut self, index: usize, value: &str) -> TableResult<()> {
        self.conditions.update_row(index, (), value.to_string())
    }

    pub fn remove_row(&mut self, index: usize) -> TableResult<()> {
        self.conditions.remove_row(index).map(drop)
    }

    pub fn save(&mut self, db: &Database, toaster: &mut Toaster) -> Option<String> {
        let record = HealthDataRecord::new(self.conditions.rows().to_vec());
        let result = db
            .add_health_data(&record)
            .context("Failed to save condition data");
        let id = finish(toaster, result, Some("Conditions saved successfully!"))?;
        self.reset();
        Some(id)
    }

    pub fn reset(&mut self) {
        self.conditions.reset();
    }
}

/// "Manage Health Data" page: search and delete condition sets.
#[derive(Debug, Clone, Default)]
pub struct HealthDataManager {
    records: Vec<Stored<HealthDataRecord>>,
    pub search: String,
}

impl HealthDataManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let result = db
            .list_health_data()
            .context("Failed to load health condition data");
        match finish(toaster, result, None) {
            Some(records) => {
                self.records = records;
                true
            }
            None => false,
        }
    }

    /// Records whose JSON text matches the search box.
    pub fn visible(&self) -> Vec<&Stored<HealthDataRecord>> {
        filter_health_data(&self.records, &self.search)
    }

    pub fn delete(&mut self, db: &Database, toaster: &mut Toaster, id: &str) -> bool {
        let result = db.delete_health_data(id).context("Failed to delete");
        if finish(toaster, result, Some("Record deleted")).is_none() {
            return false;
        }
        self.records.retain(|r| r.id != id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;

    #[test]
    fn test_form_keeps_one_row_and_resets() {
        let db = Database::open_in_memory().unwrap();
        let mut toaster = Toaster::default();
        let mut form = HealthDataForm::new();

        assert_eq!(form.remove_row(0), Err(TableError::MinimumRows(1)));
        form.update_row(0, "Diabetes").unwrap();
        let i = form.add_row();
        form.update_row(i, "Hypertension").unwrap();

        let id = form.save(&db, &mut toaster).unwrap();
        assert_eq!(
            toaster.latest().unwrap().message,
            "Conditions saved successfully!"
        );
        assert_eq!(form.conditions(), [""]);

        let stored = db.list_health_data().unwrap();
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].data.conditions, vec!["Diabetes", "Hypertension"]);
    }

    #[test]
    fn test_manager_search_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let mut toaster = Toaster::default();
        let keep = db
            .add_health_data(&HealthDataRecord::new(vec!["Diabetes".into()]))
            .unwrap();
        let drop_id = db
            .add_health_data(&HealthDataRecord::new(vec!["Thyroid".into()]))
            .unwrap();

        let mut manager = HealthDataManager::new();
        assert!(manager.load(&db, &mut toaster));
        manager.search = "thy".into();
        assert_eq!(manager.visible().len(), 1);

        assert!(manager.delete(&db, &mut toaster, &drop_id));
        assert_eq!(toaster.latest().unwrap().message, "Record deleted");
        assert!(manager.visible().is_empty());

        manager.search.clear();
        assert_eq!(manager.visible()[0].id, keep);
    }
}
