//! Reference data ("data" and "healthData") database operations.

use super::{Collection, Database, DbResult, Stored};
use crate::models::{DataRecord, HealthDataRecord};

impl Database {
    /// Insert a data record, returning its id.
    pub fn add_data_record(&self, record: &DataRecord) -> DbResult<String> {
        let id = self.add_document(Collection::Data, record)?;
        tracing::info!(event = "core.data.add_completed", id = %id);
        Ok(id)
    }

    /// List all data records.
    pub fn list_data_records(&self) -> DbResult<Vec<Stored<DataRecord>>> {
        self.list_documents(Collection::Data)
    }

    /// Get a data record by id.
    pub fn get_data_record(&self, id: &str) -> DbResult<Option<Stored<DataRecord>>> {
        self.get_document(Collection::Data, id)
    }

    /// Replace a data record.
    pub fn update_data_record(&self, id: &str, record: &DataRecord) -> DbResult<bool> {
        self.update_document(Collection::Data, id, record)
    }

    /// Delete a data record.
    pub fn delete_data_record(&self, id: &str) -> DbResult<bool> {
        self.delete_document(Collection::Data, id)
    }

    /// Insert a health condition set, returning its id.
    pub fn add_health_data(&self, record: &HealthDataRecord) -> DbResult<String> {
        let id = self.add_document(Collection::HealthData, record)?;
        tracing::info!(
            event = "core.health_data.add_completed",
            id = %id,
            conditions = record.conditions.len()
        );
        Ok(id)
    }

    /// List all health condition sets.
    pub fn list_health_data(&self) -> DbResult<Vec<Stored<HealthDataRecord>>> {
        self.list_documents(Collection::HealthData)
    }

    /// Delete a health condition set.
    pub fn delete_health_data(&self, id: &str) -> DbResult<bool> {
        self.delete_document(Collection::HealthData, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_record_crud() {
        let db = Database::open_in_memory().unwrap();

        let mut record = DataRecord::new();
        record.eye_type = vec!["RE".into()];
        let id = db.add_data_record(&record).unwrap();

        record.eye_type.push("LE".into());
        assert!(db.update_data_record(&id, &record).unwrap());

        let stored = db.get_data_record(&id).unwrap().unwrap();
        assert_eq!(stored.data.eye_type, vec!["RE", "LE"]);

        assert!(db.delete_data_record(&id).unwrap());
        assert!(db.list_data_records().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_single_value_document() {
        let db = Database::open_in_memory().unwrap();
        db.add_document(
            Collection::Data,
            &serde_json::json!({ "eyeType": "BE", "glass": "" }),
        )
        .unwrap();

        let records = db.list_data_records().unwrap();
        assert_eq!(records[0].data.eye_type, vec!["BE"]);
        assert!(records[0].data.glass.is_empty());
    }

    #[test]
    fn test_health_data_crud() {
        let db = Database::open_in_memory().unwrap();

        let id = db
            .add_health_data(&HealthDataRecord::new(vec!["Diabetes".into(), "BP".into()]))
            .unwrap();
        assert_eq!(db.list_health_data().unwrap()[0].data.conditions.len(), 2);

        assert!(db.delete_health_data(&id).unwrap());
        assert!(db.list_health_data().unwrap().is_empty());
    }
}
