pub mod credentials;
pub mod endpoints;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_VERIFY: &str = "verify";
pub const CMD_FORGOT_PASSWORD: &str = "forgot-password";
pub const CMD_COMPANY_PROFILE: &str = "company-profile";
pub const CMD_SHOW: &str = "show";
pub const CMD_SAVE: &str = "save";
pub const CMD_POST_JOB: &str = "post-job";
pub const CMD_DASHBOARD: &str = "dashboard";

pub const ARG_GOOGLE_ID_TOKEN: &str = "google-id-token";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_RESEND: &str = "resend";
pub const ARG_FILE: &str = "file";
pub const ARG_COPY: &str = "copy";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("recruitdesk")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login())
        .subcommand(signup())
        .subcommand(verify())
        .subcommand(forgot_password())
        .subcommand(company_profile())
        .subcommand(post_job())
        .subcommand(dashboard());

    let command = endpoints::with_args(command);
    logging::with_args(command)
}

fn google_id_token_arg() -> Arg {
    Arg::new(ARG_GOOGLE_ID_TOKEN)
        .long(ARG_GOOGLE_ID_TOKEN)
        .help("Google ID token; signs in through Google instead of email and password")
        .env("RECRUITDESK_GOOGLE_ID_TOKEN")
        .hide_env_values(true)
}

fn login() -> Command {
    let command = Command::new(CMD_LOGIN)
        .about("Sign in and show the signed-in user")
        .arg(google_id_token_arg());
    credentials::with_args(command)
}

fn signup() -> Command {
    let command = Command::new(CMD_SIGNUP)
        .about("Create an account and send the verification email")
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long(ARG_CONFIRM_PASSWORD)
                .help("Password confirmation (default: the password)")
                .env("RECRUITDESK_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(google_id_token_arg());
    credentials::with_args(command)
}

fn verify() -> Command {
    let command = Command::new(CMD_VERIFY)
        .about("Check whether the account email has been verified")
        .arg(
            Arg::new(ARG_RESEND)
                .long(ARG_RESEND)
                .help("Send a new verification email before checking")
                .action(ArgAction::SetTrue),
        );
    credentials::with_args(command)
}

fn forgot_password() -> Command {
    Command::new(CMD_FORGOT_PASSWORD)
        .about("Send a password reset email")
        .arg(credentials::email_arg())
}

fn company_profile() -> Command {
    Command::new(CMD_COMPANY_PROFILE)
        .about("Show or save the company profile of the signed-in user")
        .subcommand_required(true)
        .subcommand(credentials::with_args(
            Command::new(CMD_SHOW).about("Print the company profile"),
        ))
        .subcommand(credentials::with_args(
            Command::new(CMD_SAVE)
                .about("Create or update the company profile from a JSON file")
                .arg(file_arg("Company profile JSON (camelCase fields)")),
        ))
}

fn post_job() -> Command {
    Command::new(CMD_POST_JOB)
        .about("Create a job posting from a JSON file")
        .arg(file_arg("Job posting JSON (snake_case fields)"))
}

fn dashboard() -> Command {
    Command::new(CMD_DASHBOARD)
        .about("List job postings")
        .arg(
            Arg::new(ARG_COPY)
                .long(ARG_COPY)
                .help("Copy the URL of the posting with this id to the clipboard")
                .value_parser(clap::value_parser!(u32)),
        )
}

fn file_arg(help: &'static str) -> Arg {
    Arg::new(ARG_FILE)
        .short('f')
        .long(ARG_FILE)
        .help(help)
        .required(true)
}
