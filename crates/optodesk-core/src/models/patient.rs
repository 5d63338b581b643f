//! Patient models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used by the registration form (`<input type="date">`).
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Patient gender as captured at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All selectable genders in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse a display label (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Medical record number
    #[serde(default)]
    pub mr_no: String,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Phone number
    #[serde(default)]
    pub phone: String,
    /// Date of birth (YYYY-MM-DD)
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Age in full years, derived from `dob`
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: String,
    /// Creation timestamp
    pub created_at: String,
}

impl Patient {
    /// Create a new patient with required identity fields.
    pub fn new(mr_no: String, name: String) -> Self {
        Self {
            mr_no,
            name,
            phone: String::new(),
            dob: String::new(),
            gender: None,
            age: None,
            address: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set date of birth and recompute age against `today`.
    pub fn set_dob(&mut self, dob: &str, today: NaiveDate) {
        self.dob = dob.to_string();
        self.age = parse_dob(dob).and_then(|d| age_on(d, today));
    }

    /// Names of required registration fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.mr_no.trim().is_empty() {
            missing.push("mrNo");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.dob.trim().is_empty() {
            missing.push("dob");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Label used by pickers: `"<MR No> - <Name>"`.
    pub fn picker_label(&self) -> String {
        format!("{} - {}", self.mr_no, self.name)
    }
}

/// Parse a form date string.
pub fn parse_dob(dob: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(dob.trim(), DOB_FORMAT).ok()
}

/// Age in full years on `today`; `None` if `dob` lies in the future.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(1990, 6, 15);
        assert_eq!(age_on(dob, date(2024, 6, 14)), Some(33));
        assert_eq!(age_on(dob, date(2024, 6, 15)), Some(34));
        assert_eq!(age_on(dob, date(2024, 7, 1)), Some(34));
    }

    #[test]
    fn test_future_dob_has_no_age() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), None);
    }

    #[test]
    fn test_set_dob_recomputes_age() {
        let mut patient = Patient::new("MR001".into(), "Asha".into());
        patient.set_dob("2000-02-29", date(2024, 2, 28));
        assert_eq!(patient.age, Some(23));

        patient.set_dob("not a date", date(2024, 2, 28));
        assert_eq!(patient.age, None);
        assert_eq!(patient.dob, "not a date");
    }

    #[test]
    fn test_missing_fields() {
        let mut patient = Patient::new("MR001".into(), "Asha".into());
        assert_eq!(
            patient.missing_fields(),
            vec!["phone", "dob", "gender", "address"]
        );

        patient.phone = "555".into();
        patient.dob = "1990-01-01".into();
        patient.gender = Some(Gender::Female);
        patient.address = "12 Lake Rd".into();
        assert!(patient.missing_fields().is_empty());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let patient = Patient::new("MR001".into(), "Asha".into());
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["mrNo"], "MR001");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse(" Other "), Some(Gender::Other));
        assert_eq!(Gender::parse(""), None);
    }
}
