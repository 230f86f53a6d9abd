use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::utils::time::CalendarDate;

pub const DEFAULT_POSITION: &str = "Software Engineer Intern";

/// Identifier of an [ApplicationRecord]. Creation time in epoch milliseconds, bumped when needed
/// so that every record in a store has a distinct id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One submitted job application as it is stored on disk. Records are never edited after
/// creation, the store only appends and removes them.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: RecordId,
    pub url: String,
    pub company: String,
    pub position: String,
    /// Local calendar day of creation. The only field aggregation looks at.
    pub date: CalendarDate,
    /// Rendering of `date` for listings.
    pub date_applied: String,
}

/// What a caller submits. Blank `company` and `position` are treated the same as missing ones.
#[derive(Debug, Clone, Default)]
pub struct NewApplication {
    pub url: String,
    pub company: Option<String>,
    pub position: Option<String>,
}

impl NewApplication {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_company(self, company: impl Into<String>) -> Self {
        Self {
            company: Some(company.into()),
            ..self
        }
    }

    pub fn with_position(self, position: impl Into<String>) -> Self {
        Self {
            position: Some(position.into()),
            ..self
        }
    }
}

/// Returns trimmed value unless it's missing or blank.
pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        store::entities::{ApplicationRecord, RecordId},
        utils::time::CalendarDate,
    };

    #[test]
    fn test_reads_existing_blob_field_names() -> Result<()> {
        let blob = r#"{
            "id": 1760860800000,
            "url": "https://jobs.careers.acme.com/x",
            "company": "Acme",
            "position": "Software Engineer Intern",
            "date": "2026-10-19",
            "dateApplied": "Oct 19, 2026"
        }"#;

        let record: ApplicationRecord = serde_json::from_str(blob)?;

        assert_eq!(record.id, RecordId(1760860800000));
        assert_eq!(record.date, CalendarDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(record.date_applied, "Oct 19, 2026");

        let value = serde_json::to_value(&record)?;
        assert_eq!(value["dateApplied"], "Oct 19, 2026");
        assert_eq!(value["date"], "2026-10-19");
        Ok(())
    }
}
