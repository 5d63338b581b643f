//! Patient registration and management pages.

use anyhow::Context;
use chrono::NaiveDate;

use optodesk_core::history::{filter_patients_by_mr, patient_history, PatientHistoryRow};
use optodesk_core::models::{age_on, parse_dob, Gender, Patient};
use optodesk_core::{Database, Stored};

use super::{finish, FormError};
use crate::toast::Toaster;

/// Registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub mr_no: String,
    pub name: String,
    pub phone: String,
    dob: String,
    age: Option<u32>,
    pub gender: Option<Gender>,
    pub address: String,
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dob(&self) -> &str {
        &self.dob
    }

    /// Age derived from the date of birth.
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    /// Set the date of birth; age follows it. Clearing the date keeps the
    /// previous age.
    pub fn set_dob(&mut self, dob: &str, today: NaiveDate) {
        self.dob = dob.to_string();
        if dob.trim().is_empty() {
            return;
        }
        self.age = parse_dob(dob).and_then(|d| age_on(d, today));
    }

    pub fn to_patient(&self) -> Patient {
        let mut patient = Patient::new(self.mr_no.trim().to_string(), self.name.trim().to_string());
        patient.phone = self.phone.trim().to_string();
        patient.dob = self.dob.clone();
        patient.age = self.age;
        patient.gender = self.gender;
        patient.address = self.address.trim().to_string();
        patient
    }

    /// Validate and store the patient. Returns the new id.
    pub fn submit(&mut self, db: &Database, toaster: &mut Toaster) -> Option<String> {
        let result = self.try_submit(db);
        let id = finish(toaster, result, Some("Patient Added Successfully!"))?;
        self.reset();
        Some(id)
    }

    fn try_submit(&self, db: &Database) -> anyhow::Result<String> {
        let patient = self.to_patient();
        let missing = patient.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing).into());
        }
        db.add_patient(&patient)
            .context("Failed to add patient. Try again.")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fields editable from the manage page.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientEdit {
    pub id: String,
    pub patient: Patient,
}

impl PatientEdit {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.patient.name.trim().is_empty() {
            missing.push("name");
        }
        if self.patient.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.patient.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }
}

/// Patient list with MR search, edit and delete.
#[derive(Debug, Clone, Default)]
pub struct PatientManager {
    patients: Vec<Stored<Patient>>,
    pub search: String,
    editing: Option<PatientEdit>,
}

impl PatientManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let result = db.list_patients().context("Failed to load patients");
        match finish(toaster, result, None) {
            Some(patients) => {
                self.patients = patients;
                true
            }
            None => false,
        }
    }

    pub fn patients(&self) -> &[Stored<Patient>] {
        &self.patients
    }

    /// Patients matching the MR search box.
    pub fn visible(&self) -> Vec<&Stored<Patient>> {
        filter_patients_by_mr(&self.patients, &self.search)
    }

    /// Rows for the patient history page.
    pub fn history(&self) -> Vec<PatientHistoryRow> {
        patient_history(&self.patients)
    }

    pub fn delete(&mut self, db: &Database, toaster: &mut Toaster, id: &str) -> bool {
        let result = db.delete_patient(id).context("Failed to delete patient");
        if finish(toaster, result, Some("Patient deleted")).is_none() {
            return false;
        }
        self.load(db, toaster)
    }

    /// Start editing a loaded patient.
    pub fn open_edit(&mut self, id: &str) -> bool {
        self.editing = self
            .patients
            .iter()
            .find(|p| p.id == id)
            .map(|p| PatientEdit {
                id: p.id.clone(),
                patient: p.data.clone(),
            });
        self.editing.is_some()
    }

    pub fn editing(&self) -> Option<&PatientEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut PatientEdit> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the open edit. The edit stays open on failure.
    pub fn save_edit(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let Some(edit) = self.editing.as_ref() else {
            return false;
        };
        let result = Self::try_save(db, edit);
        if finish(toaster, result, Some("Patient updated successfully")).is_none() {
            return false;
        }
        self.editing = None;
        self.load(db, toaster)
    }

    fn try_save(db: &Database, edit: &PatientEdit) -> anyhow::Result<()> {
        let missing = edit.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::Incomplete(missing).into());
        }
        let updated = db
            .update_patient(&edit.id, &edit.patient)
            .context("Failed to update patient")?;
        if !updated {
            anyhow::bail!("Failed to update patient");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn filled_form(mr_no: &str) -> PatientForm {
        let mut form = PatientForm::new();
        form.mr_no = mr_no.into();
        form.name = "Asha Rao".into();
        form.phone = "9876543210".into();
        form.set_dob("1990-06-02", today());
        form.gender = Some(Gender::Female);
        form.address = "12 Lake Road".into();
        form
    }

    #[test]
    fn test_dob_drives_age() {
        let mut form = PatientForm::new();
        form.set_dob("1990-06-02", today());
        assert_eq!(form.age(), Some(33));
        form.set_dob("1990-06-01", today());
        assert_eq!(form.age(), Some(34));
        form.set_dob("", today());
        assert_eq!(form.age(), Some(34));
    }

    #[test]
    fn test_submit_requires_all_fields() {
        let db = Database::open_in_memory().unwrap();
        let mut toaster = Toaster::default();
        let mut form = filled_form("MR001");
        form.address.clear();

        assert_eq!(form.submit(&db, &mut toaster), None);
        let toast = toaster.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Please fill all required fields");
        assert!(db.list_patients().unwrap().is_empty());
        assert_eq!(form.mr_no, "MR001");
    }

    #[test]
    fn test_submit_stores_and_resets() {
        let db = Database::open_in_memory().unwrap();
        let mut toaster = Toaster::default();
        let mut form = filled_form("MR001");

        let id = form.submit(&db, &mut toaster).unwrap();
        assert_eq!(toaster.latest().unwrap().message, "Patient Added Successfully!");
        assert_eq!(form, PatientForm::default());

        let stored = db.get_patient(&id).unwrap().unwrap();
        assert_eq!(stored.data.age, Some(33));
        assert_eq!(stored.data.gender, Some(Gender::Female));
    }

    #[test]
    fn test_manager_search_edit_delete() {
        let db = Database::open_in_memory().unwrap();
        let mut toaster = Toaster::default();
        filled_form("MR001").submit(&db, &mut toaster).unwrap();
        filled_form("MR002").submit(&db, &mut toaster).unwrap();

        let mut manager = PatientManager::new();
        assert!(manager.load(&db, &mut toaster));
        manager.search = "002".into();
        let id = manager.visible()[0].id.clone();

        assert!(manager.open_edit(&id));
        manager.editing_mut().unwrap().patient.phone.clear();
        assert!(!manager.save_edit(&db, &mut toaster));
        assert_eq!(toaster.latest().unwrap().message, "Please fill all fields");
        assert!(manager.editing().is_some());

        manager.editing_mut().unwrap().patient.phone = "111".into();
        assert!(manager.save_edit(&db, &mut toaster));
        assert_eq!(toaster.latest().unwrap().message, "Patient updated successfully");
        assert_eq!(db.get_patient(&id).unwrap().unwrap().data.phone, "111");

        assert!(manager.delete(&db, &mut toaster, &id));
        assert_eq!(manager.patients().len(), 1);
        assert_eq!(manager.history()[0].mr_no, "MR001");
    }
}
