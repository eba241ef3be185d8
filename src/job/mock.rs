use anyhow::Result;
use async_trait::async_trait;

use super::{Job, JobSource, JobType};

/// Offline job table keyed by job type.
///
/// Also serves as the fallback whenever a remote fetch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    pub fn jobs(job_type: JobType) -> Vec<Job> {
        let rows: &[Row] = match job_type {
            JobType::Internships => INTERNSHIPS,
            JobType::Newgrad => NEW_GRAD,
            JobType::Fulltime => FULL_TIME,
        };
        rows.iter().map(Row::to_job).collect()
    }
}

#[async_trait]
impl JobSource for MockSource {
    async fn fetch(&self, job_type: JobType) -> Result<Vec<Job>> {
        let jobs = Self::jobs(job_type);
        tracing::debug!(count = jobs.len(), %job_type, "generated mock jobs");
        Ok(jobs)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

struct Row {
    company: &'static str,
    title: &'static str,
    location: &'static str,
    url: &'static str,
    description: &'static str,
    requirements: &'static [&'static str],
    posted_date: &'static str,
    deadline: &'static str,
    salary: &'static str,
    employment_type: &'static str,
    experience_level: &'static str,
}

impl Row {
    fn to_job(&self) -> Job {
        Job {
            company: Some(self.company.to_string()),
            title: Some(self.title.to_string()),
            location: Some(self.location.to_string()),
            url: Some(self.url.to_string()),
            link: None,
            description: Some(self.description.to_string()),
            requirements: self.requirements.iter().map(|r| (*r).to_string()).collect(),
            posted_date: Some(self.posted_date.to_string()),
            deadline: Some(self.deadline.to_string()),
            salary: Some(self.salary.to_string()),
            employment_type: Some(self.employment_type.to_string()),
            experience_level: Some(self.experience_level.to_string()),
            source: Some("mock".to_string()),
        }
    }
}

const INTERNSHIPS: &[Row] = &[
    Row {
        company: "Google",
        title: "Software Engineering Intern",
        location: "Mountain View, CA",
        url: "https://careers.google.com/jobs",
        description: "Work on cutting-edge projects with experienced engineers.",
        requirements: &["Python", "Java", "Data Structures"],
        posted_date: "2024-01-15",
        deadline: "2024-03-01",
        salary: "$8000/month",
        employment_type: "Internship",
        experience_level: "Student",
    },
    Row {
        company: "Microsoft",
        title: "Software Development Engineer Intern",
        location: "Seattle, WA",
        url: "https://careers.microsoft.com",
        description: "Build features for Microsoft products used by millions.",
        requirements: &["C++", "JavaScript", "React"],
        posted_date: "2024-01-20",
        deadline: "2024-03-15",
        salary: "$7500/month",
        employment_type: "Internship",
        experience_level: "Student",
    },
    Row {
        company: "Meta",
        title: "Frontend Engineering Intern",
        location: "Remote",
        url: "https://www.metacareers.com",
        description: "Work on React applications at massive scale.",
        requirements: &["React", "TypeScript", "GraphQL"],
        posted_date: "2024-01-25",
        deadline: "2024-04-01",
        salary: "$8500/month",
        employment_type: "Internship",
        experience_level: "Student",
    },
    Row {
        company: "Amazon",
        title: "Software Development Engineer Intern",
        location: "Austin, TX",
        url: "https://amazon.jobs",
        description: "Build scalable systems for AWS services.",
        requirements: &["Java", "Python", "AWS"],
        posted_date: "2024-02-01",
        deadline: "2024-03-30",
        salary: "$7200/month",
        employment_type: "Internship",
        experience_level: "Student",
    },
    Row {
        company: "Spotify",
        title: "Data Science Intern",
        location: "New York, NY",
        url: "https://www.lifeatspotify.com/jobs",
        description: "Analyze user behavior and improve recommendation algorithms.",
        requirements: &["Python", "SQL", "Machine Learning"],
        posted_date: "2024-02-05",
        deadline: "2024-04-15",
        salary: "$6800/month",
        employment_type: "Internship",
        experience_level: "Student",
    },
];

const NEW_GRAD: &[Row] = &[
    Row {
        company: "Apple",
        title: "Software Engineer - New Grad",
        location: "Cupertino, CA",
        url: "https://jobs.apple.com",
        description: "Join the team building the next generation of Apple products.",
        requirements: &["Swift", "Objective-C", "iOS Development"],
        posted_date: "2024-01-10",
        deadline: "2024-06-01",
        salary: "$140000/year",
        employment_type: "Full-time",
        experience_level: "New Grad",
    },
    Row {
        company: "Netflix",
        title: "Backend Engineer - New Grad",
        location: "Los Gatos, CA",
        url: "https://jobs.netflix.com",
        description: "Build microservices that power streaming for millions.",
        requirements: &["Java", "Spring", "Microservices"],
        posted_date: "2024-01-18",
        deadline: "2024-05-30",
        salary: "$135000/year",
        employment_type: "Full-time",
        experience_level: "New Grad",
    },
    Row {
        company: "Uber",
        title: "Software Engineer I",
        location: "San Francisco, CA",
        url: "https://www.uber.com/careers",
        description: "Work on systems that connect millions of riders and drivers.",
        requirements: &["Go", "Python", "Kubernetes"],
        posted_date: "2024-02-01",
        deadline: "2024-07-01",
        salary: "$128000/year",
        employment_type: "Full-time",
        experience_level: "New Grad",
    },
];

const FULL_TIME: &[Row] = &[
    Row {
        company: "OpenAI",
        title: "Senior Software Engineer",
        location: "San Francisco, CA",
        url: "https://openai.com/careers",
        description: "Build AI systems that benefit humanity.",
        requirements: &["Python", "TensorFlow", "Distributed Systems"],
        posted_date: "2024-01-05",
        deadline: "2024-08-01",
        salary: "$200000/year",
        employment_type: "Full-time",
        experience_level: "Senior",
    },
    Row {
        company: "Stripe",
        title: "Staff Software Engineer",
        location: "Remote",
        url: "https://stripe.com/jobs",
        description: "Build the financial infrastructure for the internet.",
        requirements: &["Ruby", "Scala", "Financial Systems"],
        posted_date: "2024-02-10",
        deadline: "2024-09-01",
        salary: "$220000/year",
        employment_type: "Full-time",
        experience_level: "Staff",
    },
];
