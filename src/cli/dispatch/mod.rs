//! Maps validated CLI matches to an [`Action`]. Endpoint arguments are global
//! and read from the top-level matches; everything else comes from the
//! selected subcommand.

use crate::app_lib::AppConfig;
use crate::cli::actions::{
    company_profile::{self, ProfileCommand},
    dashboard, forgot_password,
    login::{self, Method},
    post_job, signup, verify, Action,
};
use crate::cli::commands::{
    self, credentials::Credentials, endpoints, ARG_CONFIRM_PASSWORD, ARG_COPY, ARG_FILE,
    ARG_GOOGLE_ID_TOKEN, ARG_RESEND,
};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = endpoints::Options::parse(matches).into_config();

    match matches.subcommand() {
        Some((commands::CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args {
            config,
            method: sign_in_method(sub_m)?,
        })),
        Some((commands::CMD_SIGNUP, sub_m)) => Ok(Action::Signup(signup::Args {
            config,
            method: sign_in_method(sub_m)?,
            confirm_password: non_empty(sub_m, ARG_CONFIRM_PASSWORD).map(SecretString::from),
        })),
        Some((commands::CMD_VERIFY, sub_m)) => Ok(Action::Verify(verify::Args {
            config,
            credentials: Credentials::parse(sub_m)?,
            resend: sub_m.get_flag(ARG_RESEND),
        })),
        Some((commands::CMD_FORGOT_PASSWORD, sub_m)) => {
            Ok(Action::ForgotPassword(forgot_password::Args {
                config,
                email: non_empty(sub_m, commands::credentials::ARG_EMAIL).unwrap_or_default(),
            }))
        }
        Some((commands::CMD_COMPANY_PROFILE, sub_m)) => company_profile_action(config, sub_m),
        Some((commands::CMD_POST_JOB, sub_m)) => Ok(Action::PostJob(post_job::Args {
            config,
            file: file(sub_m)?,
        })),
        Some((commands::CMD_DASHBOARD, sub_m)) => Ok(Action::Dashboard(dashboard::Args {
            config,
            copy: sub_m.get_one::<u32>(ARG_COPY).copied(),
        })),
        Some((name, _)) => bail!("unknown subcommand: {name}"),
        None => bail!("missing subcommand"),
    }
}

fn company_profile_action(config: AppConfig, matches: &ArgMatches) -> Result<Action> {
    let (command, sub_m) = match matches.subcommand() {
        Some((commands::CMD_SHOW, sub_m)) => (ProfileCommand::Show, sub_m),
        Some((commands::CMD_SAVE, sub_m)) => (ProfileCommand::Save { file: file(sub_m)? }, sub_m),
        _ => bail!("missing subcommand: company-profile show|save"),
    };

    Ok(Action::CompanyProfile(company_profile::Args {
        config,
        credentials: Credentials::parse(sub_m)?,
        command,
    }))
}

/// Google when an id token is given, email and password otherwise.
fn sign_in_method(matches: &ArgMatches) -> Result<Method> {
    match non_empty(matches, ARG_GOOGLE_ID_TOKEN) {
        Some(token) => Ok(Method::Google(SecretString::from(token))),
        None => Ok(Method::Password(Credentials::parse(matches)?)),
    }
}

fn file(matches: &ArgMatches) -> Result<PathBuf> {
    non_empty(matches, ARG_FILE)
        .map(PathBuf::from)
        .context("missing required argument: --file")
}

// Filter empty strings which clap passes through when env vars are set to ""
fn non_empty(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .filter(|value| !value.trim().is_empty())
}
