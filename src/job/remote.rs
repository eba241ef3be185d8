use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{Job, JobSource, JobType};

/// Loosely-shaped record as served by remote job feeds.
#[derive(Debug, Default, Deserialize)]
struct RawJob {
    company: Option<String>,
    title: Option<String>,
    position: Option<String>,
    location: Option<String>,
    url: Option<String>,
    link: Option<String>,
    apply_url: Option<String>,
    description: Option<String>,
    #[serde(default)]
    requirements: Vec<String>,
    posted_date: Option<String>,
    deadline: Option<String>,
    salary: Option<String>,
    #[serde(rename = "type")]
    employment_type: Option<String>,
    experience_level: Option<String>,
}

impl RawJob {
    fn normalize(self) -> Job {
        let url = [self.url, self.link, self.apply_url]
            .into_iter()
            .flatten()
            .find(|u| !u.is_empty())
            .unwrap_or_default();

        Job {
            company: Some(self.company.unwrap_or_else(|| "Unknown Company".to_string())),
            title: Some(
                self.title
                    .or(self.position)
                    .unwrap_or_else(|| "Unknown Position".to_string()),
            ),
            location: Some(self.location.unwrap_or_else(|| "Location TBD".to_string())),
            url: Some(url),
            link: None,
            description: Some(self.description.unwrap_or_default()),
            requirements: self.requirements,
            posted_date: Some(self.posted_date.unwrap_or_default()),
            deadline: Some(self.deadline.unwrap_or_default()),
            salary: Some(self.salary.unwrap_or_default()),
            employment_type: Some(self.employment_type.unwrap_or_default()),
            experience_level: Some(self.experience_level.unwrap_or_default()),
            source: Some("remote".to_string()),
        }
    }
}

/// Normalises each record, skipping the ones that do not fit [`RawJob`].
fn decode_jobs(records: Vec<serde_json::Value>) -> Vec<Job> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<RawJob>(record) {
            Ok(raw) => Some(raw.normalize()),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed job record");
                None
            }
        })
        .collect()
}

/// Fetches listings from an HTTP endpoint serving `GET {endpoint}/{slug}`.
pub struct RemoteSource {
    client: Client,
    endpoint: String,
}

impl RemoteSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    fn url_for(&self, job_type: JobType) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            job_type.remote_slug()
        )
    }
}

#[async_trait]
impl JobSource for RemoteSource {
    async fn fetch(&self, job_type: JobType) -> Result<Vec<Job>> {
        let url = self.url_for(job_type);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to job feed: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Job feed request failed with status {status}: {body}");
        }

        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .with_context(|| format!("Job feed returned malformed data: {url}"))?;

        let jobs = decode_jobs(records);
        tracing::info!(count = jobs.len(), %job_type, "fetched remote jobs");
        Ok(jobs)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
