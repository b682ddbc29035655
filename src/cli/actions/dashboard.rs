use crate::app::App;
use crate::app_lib::AppConfig;
use crate::features::dashboard::{BadgeTone, Osc52Clipboard};
use crate::routes::PostingCard;
use anyhow::{bail, Context, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub copy: Option<u32>,
}

/// Execute the dashboard action: optionally copy one posting URL, then list
/// every card.
/// # Errors
/// Returns an error for an unknown posting id or when the clipboard write fails.
pub async fn execute(args: Args) -> Result<()> {
    let app = App::new(args.config).context("failed to initialize client")?;
    let page = app.dashboard_page(Arc::new(Osc52Clipboard::stdout()));

    if let Some(id) = args.copy {
        if !page.copy(id).await? {
            bail!("failed to copy the URL of job posting {id}");
        }
    }

    for card in page.cards() {
        println!("{}", render_card(&card));
    }
    Ok(())
}

fn badge(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Info => "[i]",
        BadgeTone::Success => "[+]",
        BadgeTone::Warning => "[!]",
        BadgeTone::Danger => "[x]",
    }
}

fn render_card(card: &PostingCard) -> String {
    let posting = card.posting;
    let mut line = format!(
        "#{} {} | {} | {} {} | {} applicants | posted {} | {} | {}",
        posting.id,
        posting.title,
        posting.location,
        badge(posting.status.tone()),
        posting.status.label(),
        posting.applicants,
        posting.posted_date,
        posting.key_skills.join(", "),
        posting.url,
    );
    if card.copied {
        line.push_str(" (Copied!)");
    }
    line
}
