//! Dropdown option lists derived from reference data.
//!
//! Every list is the distinct, non-empty values of one field across all
//! records, in first-seen order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{DataRecord, GeneralField, GeneralRow, HealthDataRecord};

/// Fields of a data record that back a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionField {
    EyeType,
    ChiefComplaint,
    Glass,
    Duration,
    Distance,
    Progression,
    Association,
}

impl OptionField {
    pub const ALL: [OptionField; 7] = [
        OptionField::EyeType,
        OptionField::ChiefComplaint,
        OptionField::Glass,
        OptionField::Duration,
        OptionField::Distance,
        OptionField::Progression,
        OptionField::Association,
    ];

    /// Option list backing a general-table column; `Others` is free text.
    pub fn for_general(field: GeneralField) -> Option<Self> {
        match field {
            GeneralField::Eye => Some(OptionField::EyeType),
            GeneralField::ChiefComplaint => Some(OptionField::ChiefComplaint),
            GeneralField::Glass => Some(OptionField::Glass),
            GeneralField::Duration => Some(OptionField::Duration),
            GeneralField::Distance => Some(OptionField::Distance),
            GeneralField::Progression => Some(OptionField::Progression),
            GeneralField::Association => Some(OptionField::Association),
            GeneralField::Others => None,
        }
    }

    /// Human-readable column label.
    pub fn label(&self) -> &'static str {
        match self {
            OptionField::EyeType => "Eye Type",
            OptionField::ChiefComplaint => "Chief Complaint",
            OptionField::Glass => "Glass",
            OptionField::Duration => "Duration",
            OptionField::Distance => "Distance",
            OptionField::Progression => "Progression",
            OptionField::Association => "Association",
        }
    }

    /// Values of this field in a record.
    pub fn values<'a>(&self, record: &'a DataRecord) -> &'a [String] {
        match self {
            OptionField::EyeType => &record.eye_type,
            OptionField::ChiefComplaint => &record.chief_complaint,
            OptionField::Glass => &record.glass,
            OptionField::Duration => &record.duration,
            OptionField::Distance => &record.distance,
            OptionField::Progression => &record.progression,
            OptionField::Association => &record.association,
        }
    }

    /// Mutable values of this field in a record.
    pub fn values_mut<'a>(&self, record: &'a mut DataRecord) -> &'a mut Vec<String> {
        match self {
            OptionField::EyeType => &mut record.eye_type,
            OptionField::ChiefComplaint => &mut record.chief_complaint,
            OptionField::Glass => &mut record.glass,
            OptionField::Duration => &mut record.duration,
            OptionField::Distance => &mut record.distance,
            OptionField::Progression => &mut record.progression,
            OptionField::Association => &mut record.association,
        }
    }
}

/// Option lists for every general-table dropdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCatalog {
    pub eye_type: Vec<String>,
    pub chief_complaint: Vec<String>,
    pub glass: Vec<String>,
    pub duration: Vec<String>,
    pub distance: Vec<String>,
    pub progression: Vec<String>,
    pub association: Vec<String>,
}

impl OptionCatalog {
    /// Build the catalog from data records.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DataRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        let mut catalog = Self::default();
        for field in OptionField::ALL {
            *catalog.get_mut(field) =
                distinct_non_empty(records.clone().flat_map(|r| field.values(r)));
        }
        catalog
    }

    /// Options for a field.
    pub fn get(&self, field: OptionField) -> &[String] {
        match field {
            OptionField::EyeType => &self.eye_type,
            OptionField::ChiefComplaint => &self.chief_complaint,
            OptionField::Glass => &self.glass,
            OptionField::Duration => &self.duration,
            OptionField::Distance => &self.distance,
            OptionField::Progression => &self.progression,
            OptionField::Association => &self.association,
        }
    }

    fn get_mut(&mut self, field: OptionField) -> &mut Vec<String> {
        match field {
            OptionField::EyeType => &mut self.eye_type,
            OptionField::ChiefComplaint => &mut self.chief_complaint,
            OptionField::Glass => &mut self.glass,
            OptionField::Duration => &mut self.duration,
            OptionField::Distance => &mut self.distance,
            OptionField::Progression => &mut self.progression,
            OptionField::Association => &mut self.association,
        }
    }

    /// Total number of options across all fields.
    pub fn len(&self) -> usize {
        OptionField::ALL.iter().map(|f| self.get(*f).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Condition options for the health-history dropdown.
pub fn condition_options<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a HealthDataRecord>,
{
    distinct_non_empty(records.into_iter().flat_map(|r| r.conditions.iter()))
}

/// Eyes already chosen in the general table, for the ocular-history picker.
pub fn eye_options<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a GeneralRow>,
{
    distinct_non_empty(rows.into_iter().map(|r| &r.eye))
}

fn distinct_non_empty<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_string()))
        .map(str::to_string)
        .collect()
}
