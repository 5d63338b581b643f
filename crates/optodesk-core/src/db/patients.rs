//! Patient database operations.

use super::{Collection, Database, DbResult, Stored};
use crate::models::Patient;

impl Database {
    /// Insert a new patient, returning its id.
    pub fn add_patient(&self, patient: &Patient) -> DbResult<String> {
        let id = self.add_document(Collection::Patients, patient)?;
        tracing::info!(event = "core.patient.add_completed", id = %id, mr_no = %patient.mr_no);
        Ok(id)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Stored<Patient>>> {
        self.get_document(Collection::Patients, id)
    }

    /// List all patients in registration order.
    pub fn list_patients(&self) -> DbResult<Vec<Stored<Patient>>> {
        self.list_documents(Collection::Patients)
    }

    /// Find a patient by MR number (exact, case-insensitive).
    pub fn find_patient_by_mr(&self, mr_no: &str) -> DbResult<Option<Stored<Patient>>> {
        let wanted = mr_no.trim().to_lowercase();
        Ok(self
            .list_patients()?
            .into_iter()
            .find(|p| p.data.mr_no.trim().to_lowercase() == wanted))
    }

    /// Update an existing patient.
    pub fn update_patient(&self, id: &str, patient: &Patient) -> DbResult<bool> {
        let updated = self.update_document(Collection::Patients, id, patient)?;
        if updated {
            tracing::info!(event = "core.patient.update_completed", id = %id);
        }
        Ok(updated)
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        let deleted = self.delete_document(Collection::Patients, id)?;
        if deleted {
            tracing::info!(event = "core.patient.delete_completed", id = %id);
        }
        Ok(deleted)
    }
}
