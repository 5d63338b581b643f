//! Medical bill models.
//!
//! A bill is a snapshot of the selected patient plus five row tables filled
//! in at the desk. Row tables are edited by index and stored as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::patient::{Gender, Patient};

/// Patient details copied into a bill at save time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillPatient {
    /// Store id of the patient document
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub mr_no: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: String,
}

impl BillPatient {
    /// Snapshot a stored patient.
    pub fn from_patient(id: &str, patient: &Patient) -> Self {
        Self {
            id: id.to_string(),
            mr_no: patient.mr_no.clone(),
            name: patient.name.clone(),
            phone: patient.phone.clone(),
            gender: patient.gender,
            age: patient.age,
            address: patient.address.clone(),
        }
    }
}

/// General data row (eye, complaint and refraction context).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralRow {
    #[serde(default)]
    pub eye: String,
    /// Chief complaint
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub glass: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub progression: String,
    #[serde(default)]
    pub association: String,
    /// Free text
    #[serde(default)]
    pub others: String,
}

/// Editable columns of [`GeneralRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralField {
    Eye,
    ChiefComplaint,
    Glass,
    Duration,
    Distance,
    Progression,
    Association,
    Others,
}

impl GeneralRow {
    pub fn get(&self, field: GeneralField) -> &str {
        match field {
            GeneralField::Eye => &self.eye,
            GeneralField::ChiefComplaint => &self.cc,
            GeneralField::Glass => &self.glass,
            GeneralField::Duration => &self.duration,
            GeneralField::Distance => &self.distance,
            GeneralField::Progression => &self.progression,
            GeneralField::Association => &self.association,
            GeneralField::Others => &self.others,
        }
    }

    pub fn set(&mut self, field: GeneralField, value: String) {
        let slot = match field {
            GeneralField::Eye => &mut self.eye,
            GeneralField::ChiefComplaint => &mut self.cc,
            GeneralField::Glass => &mut self.glass,
            GeneralField::Duration => &mut self.duration,
            GeneralField::Distance => &mut self.distance,
            GeneralField::Progression => &mut self.progression,
            GeneralField::Association => &mut self.association,
            GeneralField::Others => &mut self.others,
        };
        *slot = value;
    }
}

/// Systemic health history row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HealthHistoryRow {
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub duration: String,
    /// Recent investigation
    #[serde(default)]
    pub investigation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthField {
    Condition,
    Duration,
    Investigation,
}

impl HealthHistoryRow {
    pub fn get(&self, field: HealthField) -> &str {
        match field {
            HealthField::Condition => &self.condition,
            HealthField::Duration => &self.duration,
            HealthField::Investigation => &self.investigation,
        }
    }

    pub fn set(&mut self, field: HealthField, value: String) {
        match field {
            HealthField::Condition => self.condition = value,
            HealthField::Duration => self.duration = value,
            HealthField::Investigation => self.investigation = value,
        }
    }
}

/// Ocular history row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OcularHistoryRow {
    #[serde(default)]
    pub eye: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub recent_investigation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcularField {
    Eye,
    Condition,
    Duration,
    RecentInvestigation,
}

impl OcularHistoryRow {
    pub fn get(&self, field: OcularField) -> &str {
        match field {
            OcularField::Eye => &self.eye,
            OcularField::Condition => &self.condition,
            OcularField::Duration => &self.duration,
            OcularField::RecentInvestigation => &self.recent_investigation,
        }
    }

    pub fn set(&mut self, field: OcularField, value: String) {
        match field {
            OcularField::Eye => self.eye = value,
            OcularField::Condition => self.condition = value,
            OcularField::Duration => self.duration = value,
            OcularField::RecentInvestigation => self.recent_investigation = value,
        }
    }
}

/// Birth history and allergies row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BirthAllergyRow {
    #[serde(default)]
    pub birth_history: String,
    #[serde(default)]
    pub allergies: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirthAllergyField {
    BirthHistory,
    Allergies,
}

impl BirthAllergyRow {
    pub fn set(&mut self, field: BirthAllergyField, value: String) {
        match field {
            BirthAllergyField::BirthHistory => self.birth_history = value,
            BirthAllergyField::Allergies => self.allergies = value,
        }
    }
}

/// Current medication row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MedicationRow {
    #[serde(default)]
    pub medication: String,
}

/// A saved medical bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub patient: BillPatient,
    /// General data rows
    #[serde(default)]
    pub items: Vec<GeneralRow>,
    #[serde(default)]
    pub health_history: Vec<HealthHistoryRow>,
    #[serde(default)]
    pub ocular_history: Vec<OcularHistoryRow>,
    #[serde(default)]
    pub birth_allergies: Vec<BirthAllergyRow>,
    #[serde(default)]
    pub medications: Vec<MedicationRow>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Bill {
    /// Create an empty bill for a patient.
    pub fn new(patient: BillPatient) -> Self {
        Self {
            patient,
            items: Vec::new(),
            health_history: Vec::new(),
            ocular_history: Vec::new(),
            birth_allergies: Vec::new(),
            medications: Vec::new(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// UTC calendar date the bill was created on.
    pub fn created_on(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    }
}
