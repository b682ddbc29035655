//! Email and password arguments shared by the subcommands that sign in.

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// # Errors
    /// Returns an error if the email or password is missing or blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let email = match matches.get_one::<String>(ARG_EMAIL) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => bail!("missing required argument: --{ARG_EMAIL}"),
        };
        let password = match matches.get_one::<String>(ARG_PASSWORD) {
            Some(value) if !value.is_empty() => SecretString::from(value.clone()),
            _ => bail!("missing required argument: --{ARG_PASSWORD}"),
        };

        Ok(Self { email, password })
    }
}

#[must_use]
pub fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .long(ARG_EMAIL)
        .help("Account email address")
        .env("RECRUITDESK_EMAIL")
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(email_arg()).arg(
        Arg::new(ARG_PASSWORD)
            .long(ARG_PASSWORD)
            .help("Account password")
            .env("RECRUITDESK_PASSWORD")
            .hide_env_values(true),
    )
}
