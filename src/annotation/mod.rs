//! Headless view models for the two comment renderers.
//!
//! Views keep comment ids and transient UI flags only; comment content is
//! read from the store on every access.

mod bubble;
mod inbox;
mod time;

pub use bubble::{BubbleView, DeviceSummary, BUBBLE_AUTHOR_FALLBACK};
pub use inbox::{InboxTab, InboxView, INBOX_AUTHOR_FALLBACK};
pub use time::relative_created_time;
