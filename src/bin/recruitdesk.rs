use anyhow::Result;
use recruitdesk::cli::start;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments and initialize logging
    let action = start()?;

    // Handle the action
    action.execute().await?;

    Ok(())
}
