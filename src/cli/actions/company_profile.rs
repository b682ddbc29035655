use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::actions::login::{page_error, sign_in, Method};
use crate::cli::commands::credentials::Credentials;
use crate::features::company::CompanyProfile;
use crate::routes::ProfileMode;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ProfileCommand {
    Show,
    Save { file: PathBuf },
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub credentials: Credentials,
    pub command: ProfileCommand,
}

/// Execute the company-profile action.
/// # Errors
/// Returns an error if the sign-in, the profile fetch or the save fails, or the
/// input file cannot be read.
pub async fn execute(args: Args) -> Result<()> {
    // Read before signing in so a bad file fails fast.
    let input = match &args.command {
        ProfileCommand::Show => None,
        ProfileCommand::Save { file } => Some(read_profile(file).await?),
    };

    let app = App::new(args.config).context("failed to initialize client")?;
    sign_in(&app, Method::Password(args.credentials)).await?;

    let mut page = app.company_profile_page().await;
    if let Some(error) = page.load_error() {
        bail!("failed to load company profile: {error}");
    }

    let Some(profile) = input else {
        if page.mode() == ProfileMode::Create {
            println!("No company profile yet.");
        } else {
            println!("{}", serde_json::to_string_pretty(page.fields())?);
        }
        return Ok(());
    };

    page.start_editing();
    page.edit(|fields| *fields = profile);
    page.submit().await;

    let message = page
        .status()
        .success()
        .ok_or_else(|| page_error(page.status(), "Failed to save company profile."))?;
    println!("{message}");
    println!("{}", serde_json::to_string_pretty(page.fields())?);
    Ok(())
}

async fn read_profile(file: &Path) -> Result<CompanyProfile> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a company profile JSON document", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn read_profile_accepts_camel_case_json() {
        let path = std::env::temp_dir().join(format!(
            "recruitdesk-profile-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"companyName":"Acme","contactEmail":"hr@acme.test","linkedInProfile":"acme"}}"#
        )
        .unwrap();

        let profile = read_profile(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(profile.company_name, "Acme");
        assert_eq!(profile.linked_in_profile, "acme");
        assert!(profile.city.is_empty());
    }

    #[tokio::test]
    async fn read_profile_reports_missing_file() {
        let err = read_profile(Path::new("/nonexistent/recruitdesk.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
