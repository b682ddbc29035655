//! Dashboard page: the static posting cards and their copy buttons.

use crate::app_lib::AppError;
use crate::features::dashboard::{find_posting, Clipboard, CopyTracker, MockJobPosting, MOCK_POSTINGS};
use std::sync::Arc;
use tracing::{debug, warn};

/// A posting plus its transient "copied" flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostingCard {
    pub posting: &'static MockJobPosting,
    pub copied: bool,
}

pub struct DashboardPage {
    clipboard: Arc<dyn Clipboard>,
    tracker: CopyTracker,
}

impl DashboardPage {
    #[must_use]
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            clipboard,
            tracker: CopyTracker::new(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> Vec<PostingCard> {
        MOCK_POSTINGS
            .iter()
            .map(|posting| PostingCard {
                posting,
                copied: self.tracker.is_copied(posting.id),
            })
            .collect()
    }

    /// Copies the posting URL. Returns whether the clipboard accepted it; a
    /// clipboard failure is logged and leaves the card unchanged.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for an unknown posting id and
    /// `AppError::Config` when no runtime can run the indicator timer.
    pub async fn copy(&self, id: u32) -> Result<bool, AppError> {
        let posting = find_posting(id)
            .ok_or_else(|| AppError::Validation(format!("No job posting with id {id}.")))?;

        match self.clipboard.write_text(posting.url).await {
            Ok(()) => {
                debug!(id, "posting url copied");
                self.tracker.mark(id)?;
                Ok(true)
            }
            Err(err) => {
                warn!(id, error = %err, "failed to copy posting url");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dashboard::COPIED_INDICATOR;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingClipboard {
        texts: Mutex<Vec<String>>,
        broken: bool,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> std::io::Result<()> {
            if self.broken {
                return Err(std::io::Error::other("clipboard unavailable"));
            }
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn copied_ids(page: &DashboardPage) -> Vec<u32> {
        page.cards()
            .into_iter()
            .filter(|card| card.copied)
            .map(|card| card.posting.id)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn copy_marks_card_until_timer_expires() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let page = DashboardPage::new(clipboard.clone());

        assert!(page.copy(2).await.unwrap());
        assert_eq!(
            *clipboard.texts.lock().unwrap(),
            vec!["https://example.com/job/backend-engineer".to_string()]
        );
        assert_eq!(copied_ids(&page), vec![2]);

        tokio::time::sleep(COPIED_INDICATOR + Duration::from_millis(1)).await;
        assert!(copied_ids(&page).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn two_cards_copy_independently() {
        let page = DashboardPage::new(Arc::new(RecordingClipboard::default()));
        page.copy(1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        page.copy(6).await.unwrap();

        assert_eq!(copied_ids(&page), vec![1, 6]);
        tokio::time::sleep(Duration::from_millis(1501)).await;
        assert_eq!(copied_ids(&page), vec![6]);
    }

    #[tokio::test]
    async fn clipboard_failure_leaves_card_unmarked() {
        let page = DashboardPage::new(Arc::new(RecordingClipboard {
            broken: true,
            ..RecordingClipboard::default()
        }));
        assert!(!page.copy(3).await.unwrap());
        assert!(copied_ids(&page).is_empty());
    }

    #[tokio::test]
    async fn unknown_posting_is_an_error() {
        let page = DashboardPage::new(Arc::new(RecordingClipboard::default()));
        assert!(matches!(page.copy(42).await, Err(AppError::Validation(_))));
    }

    #[test]
    fn every_posting_has_a_card() {
        let page = DashboardPage::new(Arc::new(RecordingClipboard::default()));
        assert_eq!(page.cards().len(), 6);
    }
}
