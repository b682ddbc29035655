//! Clipboard sink for the dashboard copy button. The terminal implementation
//! emits an OSC 52 escape so the hosting terminal places the text on the
//! system clipboard.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> std::io::Result<()>;
}

/// `ESC ] 52 ; c ; <base64> BEL`
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub struct Osc52Clipboard<W> {
    writer: Mutex<W>,
}

impl<W> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl Osc52Clipboard<tokio::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> Clipboard for Osc52Clipboard<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_text(&self, text: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(osc52_sequence(text).as_bytes()).await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[tokio::test]
    async fn writes_sequence_to_writer() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard
            .write_text("https://example.com/job/ux-designer")
            .await
            .unwrap();

        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, osc52_sequence("https://example.com/job/ux-designer"));
    }
}
