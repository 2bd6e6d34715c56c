use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A job posting as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub requirements: String,

    #[serde(default)]
    pub location: String,

    /// Free-form; the backend stores either text ("50k-60k") or a number
    #[serde(default, deserialize_with = "string_or_number")]
    pub salary: Option<String>,

    /// Owner account id. Populated postings carry the owner document instead.
    #[serde(default, deserialize_with = "owner_id")]
    pub posted_by: Option<String>,

    /// Owner summary, present when the backend populates it
    #[serde(default)]
    pub company: Option<CompanySummary>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Response of `GET /api/users/me`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

impl Job {
    /// Company display name, "Company" when the backend did not populate it
    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .and_then(|c| c.first_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Company")
    }

    pub fn is_owned_by(&self, user_id: Option<&str>) -> bool {
        matches!((user_id, self.posted_by.as_deref()), (Some(user), Some(owner)) if user == owner)
    }

    /// "Posted on" date in the listing's short form, e.g. `Mar 5, 2024`
    pub fn posted_on(&self) -> Option<String> {
        self.created_at.map(|at| at.format("%b %-d, %Y").to_string())
    }

    /// Writable copy for the edit form
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            location: self.location.clone(),
            salary: self.salary.clone().unwrap_or_default(),
        }
    }
}

/// Fields a company sends to create or update a posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
}

/// A public posting annotated for the current viewer
#[derive(Debug, Clone, PartialEq)]
pub struct JobListing {
    pub job: Job,
    pub is_own_posting: bool,
}

impl JobListing {
    /// "Apply" is hidden on the viewer's own postings
    pub fn can_apply(&self) -> bool {
        !self.is_own_posting
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => Some(text),
        Some(Raw::Number(number)) => Some(number.to_string()),
        None => None,
    })
}

fn owner_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Id(String),
        Document {
            #[serde(rename = "_id", alias = "id")]
            id: String,
        },
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Id(id)) | Some(Raw::Document { id }) => Some(id),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_job() {
        let json = r#"{
            "_id": "j1",
            "title": "Field Sales",
            "description": "Sell things",
            "requirements": "Talk to people",
            "location": "Remote",
            "salary": 50000,
            "postedBy": "u1",
            "company": { "firstName": "Acme" },
            "createdAt": "2024-03-05T10:00:00.000Z"
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "j1");
        assert_eq!(job.salary.as_deref(), Some("50000"));
        assert_eq!(job.company_name(), "Acme");
        assert_eq!(job.posted_on().as_deref(), Some("Mar 5, 2024"));
        assert!(job.is_owned_by(Some("u1")));
        assert!(!job.is_owned_by(Some("u2")));
        assert!(!job.is_owned_by(None));
    }

    #[test]
    fn test_populated_owner_and_missing_company() {
        let json = r#"{
            "id": "j2",
            "title": "Closer",
            "salary": "40k",
            "postedBy": { "_id": "u9", "firstName": "Initech" }
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.posted_by.as_deref(), Some("u9"));
        assert_eq!(job.company_name(), "Company");
        assert_eq!(job.salary.as_deref(), Some("40k"));
        assert!(job.posted_on().is_none());
    }

    #[test]
    fn test_own_listing_cannot_apply() {
        let job: Job = serde_json::from_str(r#"{"_id":"j","title":"t","postedBy":"u1"}"#).unwrap();
        let listing = JobListing {
            is_own_posting: job.is_owned_by(Some("u1")),
            job,
        };
        assert!(!listing.can_apply());
    }
}
