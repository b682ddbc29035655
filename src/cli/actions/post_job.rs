use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::actions::login::page_error;
use crate::features::jobs::JobPostingInput;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub file: PathBuf,
}

/// Execute the post-job action.
/// # Errors
/// Returns an error if the file cannot be read or the backend rejects the posting.
pub async fn execute(args: Args) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let input: JobPostingInput = serde_json::from_str(&raw).with_context(|| {
        format!("{} is not a job posting JSON document", args.file.display())
    })?;

    let app = App::new(args.config).context("failed to initialize client")?;
    let mut page = app.job_posting_page();
    page.edit(|fields| *fields = input);
    page.submit().await;

    let message = page
        .status()
        .success()
        .ok_or_else(|| page_error(page.status(), "Failed to create job posting."))?;
    println!("{message}");
    Ok(())
}
