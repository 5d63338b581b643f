//! Optodesk Core Library
//!
//! Local data layer for an eye-clinic front desk: patient registration,
//! consultation bills and the reference data that feeds the form dropdowns.
//!
//! # Architecture
//!
//! ```text
//!   Patient form      Bill form       Data / Health data forms
//!        │                │                     │
//!        ▼                ▼                     ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │        Document store (SQLite `documents`)          │
//!   │  patients │ bills │ data │ healthData               │
//!   └─────────────────────────────────────────────────────┘
//!        │                │                     │
//!        ▼                ▼                     ▼
//!   Patient history   Bill history +      Option catalog
//!   (MR search)       text/date filter    (dropdown lists)
//!                          │
//!                          ▼
//!                      Dashboard
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite document store
//! - [`models`]: Domain types (Patient, Bill, DataRecord, etc.)
//! - [`options`]: Dropdown option lists derived from reference data
//! - [`history`]: History tables and list filters
//! - [`dashboard`]: Dashboard counters
//! - [`config`]: TOML configuration
//! - [`logging`]: Structured logging setup

pub mod config;
pub mod dashboard;
pub mod db;
pub mod history;
pub mod logging;
pub mod models;
pub mod options;

// Re-export commonly used types
pub use config::AppConfig;
pub use dashboard::DashboardStats;
pub use db::{Collection, Database, DbError, DbResult, Stored};
pub use models::{
    Bill, BillPatient, DataRecord, Gender, GeneralRow, HealthDataRecord, Patient,
};
pub use options::{OptionCatalog, OptionField};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum OptodeskError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for OptodeskError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => OptodeskError::NotFound(what),
            other => OptodeskError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for OptodeskError {
    fn from(e: serde_json::Error) -> Self {
        OptodeskError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for OptodeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        OptodeskError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<OptodeskCore>, OptodeskError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(OptodeskCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<OptodeskCore>, OptodeskError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(OptodeskCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct OptodeskCore {
    db: Arc<Mutex<Database>>,
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[uniffi::export]
impl OptodeskCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient. All fields are required.
    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, OptodeskError> {
        let gender = match patient.gender.as_deref() {
            Some(label) => Some(Gender::parse(label).ok_or_else(|| {
                OptodeskError::InvalidInput(format!("Unknown gender: {}", label))
            })?),
            None => None,
        };

        let mut record = Patient::new(patient.mr_no, patient.name);
        record.phone = patient.phone;
        record.gender = gender;
        record.address = patient.address;
        record.set_dob(&patient.dob, today());

        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err(OptodeskError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let db = self.db.lock()?;
        let id = db.add_patient(&record)?;
        Ok(FfiPatient::from_parts(id, record))
    }

    /// List patients in registration order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, OptodeskError> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Patients whose MR number contains `query`.
    pub fn search_patients_by_mr(&self, query: String) -> Result<Vec<FfiPatient>, OptodeskError> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(history::filter_patients_by_mr(&patients, &query)
            .into_iter()
            .cloned()
            .map(|p| p.into())
            .collect())
    }

    /// Delete a patient. Returns false if no such patient.
    pub fn delete_patient(&self, id: String) -> Result<bool, OptodeskError> {
        let db = self.db.lock()?;
        Ok(db.delete_patient(&id)?)
    }

    // =========================================================================
    // Bill Operations
    // =========================================================================

    /// Bill history, oldest first.
    pub fn list_bills(&self) -> Result<Vec<FfiBillSummary>, OptodeskError> {
        let db = self.db.lock()?;
        let bills = db.list_bills()?;
        Ok(history::bill_history(&bills)
            .into_iter()
            .map(|b| b.into())
            .collect())
    }

    /// Full bill document as JSON.
    pub fn get_bill_json(&self, id: String) -> Result<String, OptodeskError> {
        let db = self.db.lock()?;
        let bill = db
            .get_bill(&id)?
            .ok_or_else(|| OptodeskError::NotFound(format!("bills/{}", id)))?;
        Ok(serde_json::to_string(&bill.data)?)
    }

    pub fn delete_bill(&self, id: String) -> Result<bool, OptodeskError> {
        let db = self.db.lock()?;
        Ok(db.delete_bill(&id)?)
    }

    // =========================================================================
    // Reference Data Operations
    // =========================================================================

    /// Add a data record of dropdown values.
    pub fn add_data_record(&self, record: FfiDataRecord) -> Result<String, OptodeskError> {
        let db = self.db.lock()?;
        let data: DataRecord = record.into();
        Ok(db.add_data_record(&data)?)
    }

    pub fn list_data_records(&self) -> Result<Vec<FfiDataRecord>, OptodeskError> {
        let db = self.db.lock()?;
        let records = db.list_data_records()?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// Dropdown option lists built from every data record.
    pub fn option_catalog(&self) -> Result<FfiOptionCatalog, OptodeskError> {
        let db = self.db.lock()?;
        let records = db.list_data_records()?;
        let catalog = OptionCatalog::from_records(records.iter().map(|r| &r.data));
        Ok(catalog.into())
    }

    /// Condition options for the health history table.
    pub fn condition_options(&self) -> Result<Vec<String>, OptodeskError> {
        let db = self.db.lock()?;
        let records = db.list_health_data()?;
        Ok(options::condition_options(records.iter().map(|r| &r.data)))
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn dashboard_stats(&self) -> Result<FfiDashboardStats, OptodeskError> {
        let db = self.db.lock()?;
        let stats = DashboardStats::load(&db, today())?;
        Ok(stats.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe registration input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub mr_no: String,
    pub name: String,
    pub phone: String,
    /// YYYY-MM-DD
    pub dob: String,
    pub gender: Option<String>,
    pub address: String,
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub mr_no: String,
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub address: String,
    pub created_at: String,
}

impl FfiPatient {
    fn from_parts(id: String, patient: Patient) -> Self {
        Self {
            id,
            mr_no: patient.mr_no,
            name: patient.name,
            phone: patient.phone,
            dob: patient.dob,
            gender: patient.gender.map(|g| g.as_str().to_string()),
            age: patient.age,
            address: patient.address,
            created_at: patient.created_at,
        }
    }
}

impl From<Stored<Patient>> for FfiPatient {
    fn from(stored: Stored<Patient>) -> Self {
        Self::from_parts(stored.id, stored.data)
    }
}

/// FFI-safe bill history row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBillSummary {
    pub id: String,
    pub mr_no: String,
    pub patient_name: String,
    pub item_count: u32,
    pub first_complaint: Option<String>,
    pub created_at: String,
}

impl From<history::BillHistoryRow> for FfiBillSummary {
    fn from(row: history::BillHistoryRow) -> Self {
        Self {
            id: row.id,
            mr_no: row.mr_no,
            patient_name: row.patient_name,
            item_count: row.item_count as u32,
            first_complaint: row.first_complaint,
            created_at: row.created_at,
        }
    }
}

/// FFI-safe data record. `id` is ignored on insert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDataRecord {
    pub id: Option<String>,
    pub eye_type: Vec<String>,
    pub chief_complaint: Vec<String>,
    pub glass: Vec<String>,
    pub duration: Vec<String>,
    pub distance: Vec<String>,
    pub progression: Vec<String>,
    pub association: Vec<String>,
}

impl From<Stored<DataRecord>> for FfiDataRecord {
    fn from(stored: Stored<DataRecord>) -> Self {
        let record = stored.data;
        Self {
            id: Some(stored.id),
            eye_type: record.eye_type,
            chief_complaint: record.chief_complaint,
            glass: record.glass,
            duration: record.duration,
            distance: record.distance,
            progression: record.progression,
            association: record.association,
        }
    }
}

impl From<FfiDataRecord> for DataRecord {
    fn from(record: FfiDataRecord) -> Self {
        DataRecord {
            eye_type: record.eye_type,
            chief_complaint: record.chief_complaint,
            glass: record.glass,
            duration: record.duration,
            distance: record.distance,
            progression: record.progression,
            association: record.association,
            ..DataRecord::new()
        }
    }
}

/// FFI-safe option catalog.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOptionCatalog {
    pub eye_type: Vec<String>,
    pub chief_complaint: Vec<String>,
    pub glass: Vec<String>,
    pub duration: Vec<String>,
    pub distance: Vec<String>,
    pub progression: Vec<String>,
    pub association: Vec<String>,
}

impl From<OptionCatalog> for FfiOptionCatalog {
    fn from(catalog: OptionCatalog) -> Self {
        Self {
            eye_type: catalog.eye_type,
            chief_complaint: catalog.chief_complaint,
            glass: catalog.glass,
            duration: catalog.duration,
            distance: catalog.distance,
            progression: catalog.progression,
            association: catalog.association,
        }
    }
}

/// FFI-safe dashboard counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardStats {
    pub patients: u64,
    pub bills: u64,
    pub data_records: u64,
    pub bills_today: u64,
}

impl From<DashboardStats> for FfiDashboardStats {
    fn from(stats: DashboardStats) -> Self {
        Self {
            patients: stats.patients as u64,
            bills: stats.bills as u64,
            data_records: stats.data_records as u64,
            bills_today: stats.bills_today as u64,
        }
    }
}
