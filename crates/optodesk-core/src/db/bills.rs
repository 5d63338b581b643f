//! Bill database operations.

use super::{Collection, Database, DbResult, Stored};
use crate::models::Bill;

impl Database {
    /// Insert a new bill, returning its id.
    pub fn add_bill(&self, bill: &Bill) -> DbResult<String> {
        let id = self.add_document(Collection::Bills, bill)?;
        tracing::info!(
            event = "core.bill.add_completed",
            id = %id,
            mr_no = %bill.patient.mr_no,
            items = bill.items.len()
        );
        Ok(id)
    }

    /// Get a bill by id.
    pub fn get_bill(&self, id: &str) -> DbResult<Option<Stored<Bill>>> {
        self.get_document(Collection::Bills, id)
    }

    /// List all bills in creation order.
    pub fn list_bills(&self) -> DbResult<Vec<Stored<Bill>>> {
        self.list_documents(Collection::Bills)
    }

    /// Bills written for one patient.
    pub fn list_bills_for_patient(&self, patient_id: &str) -> DbResult<Vec<Stored<Bill>>> {
        Ok(self
            .list_bills()?
            .into_iter()
            .filter(|b| b.data.patient.id == patient_id)
            .collect())
    }

    /// Delete a bill.
    pub fn delete_bill(&self, id: &str) -> DbResult<bool> {
        let deleted = self.delete_document(Collection::Bills, id)?;
        if deleted {
            tracing::info!(event = "core.bill.delete_completed", id = %id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillPatient, GeneralRow, MedicationRow, Patient};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_bill(db: &Database, mr_no: &str) -> (String, Bill) {
        let patient = Patient::new(mr_no.into(), "Asha".into());
        let patient_id = db.add_patient(&patient).unwrap();

        let mut bill = Bill::new(BillPatient::from_patient(&patient_id, &patient));
        bill.items.push(GeneralRow {
            eye: "RE".into(),
            cc: "Itching".into(),
            ..GeneralRow::default()
        });
        bill.medications.push(MedicationRow {
            medication: "Lubricant drops".into(),
        });
        (patient_id, bill)
    }

    #[test]
    fn test_insert_and_get_bill() {
        let db = setup_db();
        let (patient_id, bill) = make_bill(&db, "MR001");

        let id = db.add_bill(&bill).unwrap();
        let retrieved = db.get_bill(&id).unwrap().unwrap();

        assert_eq!(retrieved.data.patient.id, patient_id);
        assert_eq!(retrieved.data.items.len(), 1);
        assert_eq!(retrieved.data.items[0].cc, "Itching");
        assert_eq!(retrieved.data.medications[0].medication, "Lubricant drops");
    }

    #[test]
    fn test_bills_for_patient() {
        let db = setup_db();
        let (first_id, first) = make_bill(&db, "MR001");
        let (_, second) = make_bill(&db, "MR002");

        db.add_bill(&first).unwrap();
        db.add_bill(&first).unwrap();
        db.add_bill(&second).unwrap();

        assert_eq!(db.list_bills().unwrap().len(), 3);
        assert_eq!(db.list_bills_for_patient(&first_id).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_bill() {
        let db = setup_db();
        let (_, bill) = make_bill(&db, "MR001");

        let id = db.add_bill(&bill).unwrap();
        assert!(db.delete_bill(&id).unwrap());
        assert!(db.get_bill(&id).unwrap().is_none());
    }
}
