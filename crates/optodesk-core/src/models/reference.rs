//! Reference data records that feed the dropdown option lists.

use serde::{Deserialize, Deserializer, Serialize};

/// A "data" document: candidate values for the general-table dropdowns.
///
/// Older documents hold one string per field, edited ones hold arrays; both
/// read into a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    #[serde(default, deserialize_with = "one_or_many")]
    pub eye_type: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub chief_complaint: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub glass: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub duration: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub distance: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub progression: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub association: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

impl DataRecord {
    pub fn new() -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            ..Self::default()
        }
    }
}

/// A "healthData" document: a set of systemic conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataRecord {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

impl HealthDataRecord {
    pub fn new(conditions: Vec<String>) -> Self {
        Self {
            conditions,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) if s.is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_string_fields() {
        let json = r#"{"eyeType":"RE","chiefComplaint":"","glass":"Bifocal"}"#;
        let record: DataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.eye_type, vec!["RE"]);
        assert!(record.chief_complaint.is_empty());
        assert_eq!(record.glass, vec!["Bifocal"]);
        assert!(record.association.is_empty());
    }

    #[test]
    fn test_array_and_null_fields() {
        let json = r#"{"eyeType":["RE","LE"],"duration":null}"#;
        let record: DataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.eye_type, vec!["RE", "LE"]);
        assert!(record.duration.is_empty());
    }

    #[test]
    fn test_health_data_roundtrip_names() {
        let record = HealthDataRecord::new(vec!["Diabetes".into()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["conditions"][0], "Diabetes");
        assert!(json.get("createdAt").is_some());
    }
}
