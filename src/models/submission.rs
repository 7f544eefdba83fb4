//! Submission model

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::technology::Technology;

/// Row of the `submissions` table
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: i64,
    pub company_name: String,
    pub company_link: String,
    pub position: String,
    pub salary_in_cents: i64,
    pub comments: Option<String>,
    pub benefits: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Submission with its technologies resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub company_name: String,
    pub company_link: String,
    pub position: String,
    pub salary_in_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    pub technologies: Vec<Technology>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn from_row(row: SubmissionRow, technologies: Vec<Technology>) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            company_link: row.company_link,
            position: row.position,
            salary_in_cents: row.salary_in_cents,
            comments: row.comments,
            benefits: row.benefits,
            technologies,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub company_name: String,
    pub company_link: String,
    pub position: String,
    #[serde(alias = "salary_in_cents", alias = "salary")]
    pub salary_in_cents: i64,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub technology_ids: Vec<i64>,
    #[serde(default)]
    pub technology_names: Vec<String>,
}

/// Validated submission ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub company_name: String,
    pub company_link: String,
    pub position: String,
    pub salary_in_cents: i64,
    pub comments: Option<String>,
    pub benefits: Option<String>,
    /// Distinct, ascending
    pub technology_ids: Vec<i64>,
    /// Normalized, distinct case-insensitively
    pub technology_names: Vec<String>,
}

/// Technology ids arrive as numbers or as numeric strings
fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Vec::<Id>::deserialize(deserializer)?
        .into_iter()
        .map(|id| match id {
            Id::Number(n) => Ok(n),
            Id::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid technology id: {:?}", s))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_accepts_aliases_and_string_ids() {
        let request: CreateSubmissionRequest = serde_json::from_value(json!({
            "companyName": "Acme",
            "companyLink": "https://acme.test",
            "position": "Backend Engineer",
            "salary_in_cents": 550000,
            "technologyIds": [1, "2", " 3 "]
        }))
        .unwrap();

        assert_eq!(request.salary_in_cents, 550000);
        assert_eq!(request.technology_ids, vec![1, 2, 3]);
        assert!(request.technology_names.is_empty());
        assert!(request.comments.is_none());
    }

    #[test]
    fn test_create_request_rejects_missing_fields() {
        let result = serde_json::from_value::<CreateSubmissionRequest>(json!({
            "companyLink": "https://acme.test",
            "position": "Backend Engineer",
            "salaryInCents": 1000
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("companyName"));
    }

    #[test]
    fn test_create_request_rejects_bad_ids() {
        let result = serde_json::from_value::<CreateSubmissionRequest>(json!({
            "companyName": "Acme",
            "companyLink": "https://acme.test",
            "position": "Backend Engineer",
            "salaryInCents": 1000,
            "technologyIds": ["rust"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_submission_serializes_camel_case_without_empty_optionals() {
        let submission = Submission {
            id: 1,
            company_name: "Acme".into(),
            company_link: "https://acme.test".into(),
            position: "SRE".into(),
            salary_in_cents: 100,
            comments: None,
            benefits: Some("Remote".into()),
            technologies: vec![],
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["salaryInCents"], 100);
        assert_eq!(value["benefits"], "Remote");
        assert!(value.get("comments").is_none());
    }
}
