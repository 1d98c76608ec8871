use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::common::{JobFailedSnafu, JobTimeoutSnafu, Result};

use super::Session;

/// How the session follows asynchronous jobs started by mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPolicy {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for JobPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_polls: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum JobStatus {
    Initialized,
    Running,
    Completed,
    Error,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Job {
    #[serde(rename = "jobId", default)]
    pub job_id: String,
    pub status: JobStatus,
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: Option<url::Url>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<JobError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: String,
}

impl JobError {
    fn describe(&self) -> String {
        match self.details.is_empty() {
            true => self.message.clone(),
            false => format!("{} ({})", self.message, self.details),
        }
    }
}

impl Session {
    pub(crate) fn wait_for_job(&self, mut job: Job) -> Result<Option<Value>> {
        let mut polls = 0;
        loop {
            match job.status {
                JobStatus::Completed => {
                    tracing::debug!(job_id = job.job_id.as_str(), polls, "Job completed");
                    return Ok(job.response);
                }
                JobStatus::Error => {
                    return JobFailedSnafu {
                        job_id: job.job_id,
                        message: job
                            .error
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "no error detail".to_string()),
                    }
                    .fail()
                }
                JobStatus::Initialized | JobStatus::Running => {}
            }

            if polls >= self.jobs.max_polls {
                return JobTimeoutSnafu {
                    job_id: job.job_id,
                    polls,
                }
                .fail();
            }

            let Some(mut url) = job.callback_url.clone() else {
                return JobFailedSnafu {
                    job_id: job.job_id,
                    message: "job has no callback URL",
                }
                .fail();
            };
            url.query_pairs_mut().append_pair("showDetails", "true");

            std::thread::sleep(self.jobs.interval);
            polls += 1;
            job = self.get(url)?;
        }
    }
}
