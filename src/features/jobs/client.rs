use super::types::{CreatedJob, JobEnvelope, JobErrorBody, JobPostingInput};
use crate::app_lib::{ApiClient, AppError};
use tracing::{debug, info};

pub const JOBS_PATH: &str = "/api/jobs";

#[derive(Clone, Debug)]
pub struct JobsClient {
    api: ApiClient,
}

impl JobsClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submits a posting. Failures carry the body's `error` text, or an empty
    /// message when the body has none.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// undecodable success body.
    pub async fn create(&self, input: &JobPostingInput) -> Result<CreatedJob, AppError> {
        let response = self.api.post_json_raw(JOBS_PATH, &[], input).await?;
        let status = response.status();

        if status.is_success() {
            let envelope: JobEnvelope = response
                .json()
                .await
                .map_err(|err| AppError::Parse(format!("Failed to decode job response: {err}")))?;
            info!(job_id = %envelope.job.id, "job posting created");
            return Ok(envelope.job);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<JobErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_default();
        debug!(status = status.as_u16(), "job posting rejected");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
