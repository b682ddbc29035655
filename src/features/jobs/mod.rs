//! Job posting submission.

pub mod client;
pub mod types;

pub use client::{JobsClient, JOBS_PATH};
pub use types::{CreatedJob, JobId, JobPostingInput};
