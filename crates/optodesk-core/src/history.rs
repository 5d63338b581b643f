//! History views and list filters over stored records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::Stored;
use crate::models::{Bill, Gender, HealthDataRecord, Patient};

/// One row of the patient history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientHistoryRow {
    pub id: String,
    pub mr_no: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub created_at: String,
}

impl From<&Stored<Patient>> for PatientHistoryRow {
    fn from(stored: &Stored<Patient>) -> Self {
        Self {
            id: stored.id.clone(),
            mr_no: stored.data.mr_no.clone(),
            name: stored.data.name.clone(),
            age: stored.data.age,
            gender: stored.data.gender,
            created_at: stored.data.created_at.clone(),
        }
    }
}

/// One row of the bill history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillHistoryRow {
    pub id: String,
    pub mr_no: String,
    pub patient_name: String,
    /// Number of general data rows
    pub item_count: usize,
    /// Chief complaint of the first row, if any
    pub first_complaint: Option<String>,
    pub created_at: String,
}

impl From<&Stored<Bill>> for BillHistoryRow {
    fn from(stored: &Stored<Bill>) -> Self {
        let bill = &stored.data;
        Self {
            id: stored.id.clone(),
            mr_no: bill.patient.mr_no.clone(),
            patient_name: bill.patient.name.clone(),
            item_count: bill.items.len(),
            first_complaint: bill
                .items
                .first()
                .map(|row| row.cc.clone())
                .filter(|cc| !cc.is_empty()),
            created_at: bill.created_at.clone(),
        }
    }
}

pub fn patient_history(patients: &[Stored<Patient>]) -> Vec<PatientHistoryRow> {
    patients.iter().map(PatientHistoryRow::from).collect()
}

pub fn bill_history(bills: &[Stored<Bill>]) -> Vec<BillHistoryRow> {
    bills.iter().map(BillHistoryRow::from).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Patients whose MR number contains `query` (case-insensitive).
pub fn filter_patients_by_mr<'a>(
    patients: &'a [Stored<Patient>],
    query: &str,
) -> Vec<&'a Stored<Patient>> {
    patients
        .iter()
        .filter(|p| contains_ignore_case(&p.data.mr_no, query))
        .collect()
}

/// Text and date filter for the bill manager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillFilter {
    /// Matches MR number or patient name
    pub text: String,
    /// Matches the bill's UTC creation date
    pub date: Option<NaiveDate>,
}

impl BillFilter {
    pub fn matches(&self, bill: &Bill) -> bool {
        let text = self.text.trim();
        if !text.is_empty()
            && !contains_ignore_case(&bill.patient.mr_no, text)
            && !contains_ignore_case(&bill.patient.name, text)
        {
            return false;
        }

        match self.date {
            Some(date) => bill.created_on() == Some(date),
            None => true,
        }
    }

    pub fn apply<'a>(&self, bills: &'a [Stored<Bill>]) -> Vec<&'a Stored<Bill>> {
        bills.iter().filter(|b| self.matches(&b.data)).collect()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.date = None;
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.date.is_none()
    }
}

/// Health condition sets whose JSON text contains `query`.
pub fn filter_health_data<'a>(
    records: &'a [Stored<HealthDataRecord>],
    query: &str,
) -> Vec<&'a Stored<HealthDataRecord>> {
    records
        .iter()
        .filter(|r| {
            serde_json::to_string(&r.data)
                .map(|json| contains_ignore_case(&json, query))
                .unwrap_or(false)
        })
        .collect()
}
