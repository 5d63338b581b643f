//! Dashboard counters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{Collection, Database, DbResult};

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub patients: usize,
    pub bills: usize,
    pub data_records: usize,
    /// Bills created on the given day (UTC)
    pub bills_today: usize,
}

impl DashboardStats {
    /// Load counts, treating `today` as the current UTC date.
    pub fn load(db: &Database, today: NaiveDate) -> DbResult<Self> {
        let bills = db.list_bills()?;
        let bills_today = bills
            .iter()
            .filter(|b| b.data.created_on() == Some(today))
            .count();

        let stats = Self {
            patients: db.count_documents(Collection::Patients)?,
            bills: bills.len(),
            data_records: db.count_documents(Collection::Data)?,
            bills_today,
        };

        tracing::debug!(
            event = "core.dashboard.load_completed",
            patients = stats.patients,
            bills = stats.bills,
            bills_today = stats.bills_today
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bill, BillPatient, DataRecord, Patient};

    #[test]
    fn test_empty_dashboard() {
        let db = Database::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(DashboardStats::load(&db, today).unwrap(), DashboardStats::default());
    }

    #[test]
    fn test_counts_and_bills_today() {
        let db = Database::open_in_memory().unwrap();
        db.add_patient(&Patient::new("MR001".into(), "Asha".into()))
            .unwrap();
        db.add_data_record(&DataRecord::new()).unwrap();

        for created_at in [
            "2024-05-01T23:59:59Z",
            "2024-05-02T00:00:00Z",
            "2024-05-02T12:30:00Z",
        ] {
            let mut bill = Bill::new(BillPatient::default());
            bill.created_at = created_at.into();
            db.add_bill(&bill).unwrap();
        }

        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let stats = DashboardStats::load(&db, today).unwrap();
        assert_eq!(stats.patients, 1);
        assert_eq!(stats.bills, 3);
        assert_eq!(stats.data_records, 1);
        assert_eq!(stats.bills_today, 2);
    }
}
