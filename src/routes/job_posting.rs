//! Job posting page. A successful submit resets every field.

use super::{FormState, FormStatus};
use crate::app_lib::AppError;
use crate::features::jobs::{JobPostingInput, JobsClient};

pub struct JobPostingPage {
    client: JobsClient,
    form: FormState<JobPostingInput>,
}

impl JobPostingPage {
    #[must_use]
    pub fn new(client: JobsClient) -> Self {
        Self {
            client,
            form: FormState::default(),
        }
    }

    pub fn edit(&mut self, change: impl FnOnce(&mut JobPostingInput)) {
        self.form.edit(change);
    }

    #[must_use]
    pub fn fields(&self) -> &JobPostingInput {
        self.form.fields()
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        self.form.status()
    }

    pub fn retry(&mut self) {
        self.form.retry();
    }

    pub async fn submit(&mut self) {
        if !self.form.begin_submit() {
            return;
        }

        let input = self.form.fields().clone();
        if let Err(err) = input.validate() {
            self.form.fail(err.user_message());
            return;
        }

        match self.client.create(&input).await {
            Ok(job) => {
                self.form.replace_fields(JobPostingInput::default());
                self.form
                    .succeed(format!("Job posting created successfully! ID: {}", job.id));
            }
            Err(err) => self.form.fail(failure_message(&err)),
        }
    }
}

fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Http { status, message } if message.trim().is_empty() => {
            format!("HTTP error! status: {status}")
        }
        AppError::Http { message, .. } => message.clone(),
        other => other.user_message(),
    }
}
