//! Static dashboard data and the clipboard plumbing behind each card's copy
//! button.

pub mod clipboard;
pub mod copy;
pub mod postings;

pub use clipboard::{Clipboard, Osc52Clipboard};
pub use copy::{CopyTracker, COPIED_INDICATOR};
pub use postings::{find_posting, BadgeTone, MockJobPosting, PostingStatus, MOCK_POSTINGS};
