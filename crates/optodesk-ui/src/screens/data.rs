//! Reference data pages: dropdown values for the general table.

use std::collections::HashMap;

use anyhow::Context;

use optodesk_core::models::DataRecord;
use optodesk_core::options::OptionField;
use optodesk_core::{Database, Stored};

use super::finish;
use crate::table::{RowTable, TableError, TableResult};
use crate::toast::Toaster;

/// "Add Data" form: one value per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataForm {
    values: HashMap<OptionField, String>,
}

impl DataForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: OptionField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set_value(&mut self, field: OptionField, value: &str) {
        self.values.insert(field, value.to_string());
    }

    pub fn to_record(&self) -> DataRecord {
        let mut record = DataRecord::new();
        for field in OptionField::ALL {
            let value = self.value(field).trim();
            if !value.is_empty() {
                field.values_mut(&mut record).push(value.to_string());
            }
        }
        record
    }

    pub fn save(&mut self, db: &Database, toaster: &mut Toaster) -> Option<String> {
        let result = db
            .add_data_record(&self.to_record())
            .context("Failed to add data");
        let id = finish(toaster, result, Some("Data Added!"))?;
        self.reset();
        Some(id)
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// A data record open for editing, one list per field.
#[derive(Debug, Clone, PartialEq)]
struct DataEdit {
    id: String,
    record: DataRecord,
    lists: HashMap<OptionField, RowTable<String>>,
}

/// "Manage Data" page: list, delete and edit data records.
#[derive(Debug, Clone, Default)]
pub struct DataEditor {
    records: Vec<Stored<DataRecord>>,
    editing: Option<DataEdit>,
}

impl DataEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let result = db.list_data_records().context("Failed to load data");
        match finish(toaster, result, None) {
            Some(records) => {
                self.records = records;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[Stored<DataRecord>] {
        &self.records
    }

    pub fn delete(&mut self, db: &Database, toaster: &mut Toaster, id: &str) -> bool {
        let result = db.delete_data_record(id).context("Delete failed");
        if finish(toaster, result, Some("Deleted successfully")).is_none() {
            return false;
        }
        self.load(db, toaster)
    }

    /// Open a loaded record for editing. Each field list keeps at least one
    /// entry.
    pub fn open_edit(&mut self, id: &str) -> bool {
        self.editing = self.records.iter().find(|r| r.id == id).map(|stored| {
            let lists = OptionField::ALL
                .into_iter()
                .map(|field| {
                    let values = field.values(&stored.data).to_vec();
                    (field, RowTable::from_rows(values, 1))
                })
                .collect();
            DataEdit {
                id: stored.id.clone(),
                record: stored.data.clone(),
                lists,
            }
        });
        self.editing.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Values of a field in the open edit.
    pub fn values(&self, field: OptionField) -> &[String] {
        self.editing
            .as_ref()
            .and_then(|edit| edit.lists.get(&field))
            .map(|list| list.rows())
            .unwrap_or_default()
    }

    pub fn add_value(&mut self, field: OptionField) -> TableResult<usize> {
        Ok(self.list_mut(field)?.add_row())
    }

    pub fn update_value(&mut self, field: OptionField, index: usize, value: &str) -> TableResult<()> {
        self.list_mut(field)?.update_row(index, (), value.to_string())
    }

    pub fn remove_value(&mut self, field: OptionField, index: usize) -> TableResult<()> {
        self.list_mut(field)?.remove_row(index).map(drop)
    }

    fn list_mut(&mut self, field: OptionField) -> TableResult<&mut RowTable<String>> {
        self.editing
            .as_mut()
            .and_then(|edit| edit.lists.get_mut(&field))
            .ok_or(TableError::NotEditing)
    }

    /// Save the open edit. The edit stays open on failure.
    pub fn save_edit(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let Some(edit) = self.editing.as_ref() else {
            return false;
        };

        let mut record = edit.record.clone();
        for (field, list) in &edit.lists {
            *field.values_mut(&mut record) = list.rows().to_vec();
        }

        let result = db
            .update_data_record(&edit.id, &record)
            .context("Failed to update")
            .and_then(|updated| {
                if updated {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Failed to update"))
                }
            });
        if finish(toaster, result, Some("Updated successfully")).is_none() {
            return false;
        }
        self.editing = None;
        self.load(db, toaster)
    }
}
