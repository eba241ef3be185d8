//! Job records and the sources that produce them.

mod feed;
mod mock;
mod remote;

pub use feed::{FetchOutcome, JobFeed, SourceMode, UnknownSourceMode};
pub use mock::MockSource;
pub use remote::RemoteSource;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A single job posting.
///
/// Every field is optional. Consumers pick their own display fallback
/// (see [`Job::company_or`] and friends) instead of assuming presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Legacy link field some feeds use instead of `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Employment type as reported by the feed ("Internship", "Full-time").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Job {
    pub fn company_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.company.as_deref().unwrap_or(fallback)
    }

    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    pub fn location_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.location.as_deref().unwrap_or(fallback)
    }

    /// The link to open for this job: `url`, then `link`, skipping empty values.
    pub fn open_url(&self) -> Option<&str> {
        [self.url.as_deref(), self.link.as_deref()]
            .into_iter()
            .flatten()
            .find(|u| !u.is_empty())
    }

    /// Looks up a field by its serialized name.
    ///
    /// Returns `None` for absent or unknown fields. `requirements` is
    /// joined with `", "`.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = match name {
            "company" => &self.company,
            "title" => &self.title,
            "location" => &self.location,
            "url" => &self.url,
            "link" => &self.link,
            "description" => &self.description,
            "requirements" => {
                return (!self.requirements.is_empty())
                    .then(|| Cow::Owned(self.requirements.join(", ")));
            }
            "posted_date" => &self.posted_date,
            "deadline" => &self.deadline,
            "salary" => &self.salary,
            "type" => &self.employment_type,
            "experience_level" => &self.experience_level,
            "source" => &self.source,
            _ => return None,
        };
        value.as_deref().map(Cow::Borrowed)
    }

    /// All present field values joined by spaces and lower-cased.
    pub fn all_text(&self) -> String {
        let mut parts: Vec<&str> = [
            &self.company,
            &self.title,
            &self.location,
            &self.url,
            &self.link,
            &self.description,
            &self.posted_date,
            &self.deadline,
            &self.salary,
            &self.employment_type,
            &self.experience_level,
            &self.source,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();
        parts.extend(self.requirements.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }

    /// Text scanned by `search`: company, title, location, description and requirements.
    pub fn search_text(&self) -> String {
        [
            self.company_or(""),
            self.title_or(""),
            self.location_or(""),
            self.description.as_deref().unwrap_or(""),
            &self.requirements.join(" "),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Identifier used to deduplicate bookmarks.
    ///
    /// Two distinct postings with the same company and title share an id.
    pub fn bookmark_id(&self) -> String {
        format!(
            "{}_{}",
            self.company_or("Unknown"),
            self.title_or("Unknown")
        )
    }
}

/// The job categories a feed can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Internships,
    Newgrad,
    Fulltime,
}

impl JobType {
    pub const ALL: [Self; 3] = [Self::Internships, Self::Newgrad, Self::Fulltime];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internships => "internships",
            Self::Newgrad => "newgrad",
            Self::Fulltime => "fulltime",
        }
    }

    /// Path segment used by remote feeds.
    pub const fn remote_slug(self) -> &'static str {
        match self {
            Self::Internships => "internship",
            Self::Newgrad => "new_grad",
            Self::Fulltime => "full_time",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job type '{0}'")]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownJobType(s.to_string()))
    }
}

/// A provider of job listings.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, job_type: JobType) -> Result<Vec<Job>>;

    /// Short label used in logs and status lines.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Job {
        Job {
            company: Some("Meta".to_string()),
            title: Some("Frontend Engineering Intern".to_string()),
            location: Some("Remote".to_string()),
            requirements: vec!["React".to_string(), "GraphQL".to_string()],
            employment_type: Some("Internship".to_string()),
            ..Job::default()
        }
    }

    #[test]
    fn test_job_type_parse() {
        assert_eq!("newgrad".parse::<JobType>().unwrap(), JobType::Newgrad);
        assert!("NewGrad".parse::<JobType>().is_err());
        assert!("contract".parse::<JobType>().is_err());
    }

    #[test]
    fn test_job_type_remote_slug() {
        assert_eq!(JobType::Internships.remote_slug(), "internship");
        assert_eq!(JobType::Fulltime.remote_slug(), "full_time");
    }

    #[test]
    fn test_field_lookup() {
        let job = sample();
        assert_eq!(job.field("company").as_deref(), Some("Meta"));
        assert_eq!(job.field("type").as_deref(), Some("Internship"));
        assert_eq!(job.field("requirements").as_deref(), Some("React, GraphQL"));
        assert!(job.field("salary").is_none());
        assert!(job.field("nonexistent").is_none());
    }

    #[test]
    fn test_open_url_falls_back_to_link() {
        let mut job = sample();
        assert!(job.open_url().is_none());

        job.link = Some("https://example.com/link".to_string());
        assert_eq!(job.open_url(), Some("https://example.com/link"));

        job.url = Some(String::new());
        assert_eq!(job.open_url(), Some("https://example.com/link"));

        job.url = Some("https://example.com/url".to_string());
        assert_eq!(job.open_url(), Some("https://example.com/url"));
    }

    #[test]
    fn test_bookmark_id_with_missing_fields() {
        assert_eq!(sample().bookmark_id(), "Meta_Frontend Engineering Intern");
        assert_eq!(Job::default().bookmark_id(), "Unknown_Unknown");
    }

    #[test]
    fn test_search_text_includes_requirements() {
        let text = sample().search_text();
        assert!(text.contains("graphql"));
        assert!(text.contains("meta"));
        assert!(!text.contains("internship"));
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let job: Job = serde_json::from_str(r#"{"company": "Acme"}"#).unwrap();
        assert_eq!(job.company_or("?"), "Acme");
        assert_eq!(job.title_or("Unknown Position"), "Unknown Position");
        assert!(job.requirements.is_empty());
    }
}
