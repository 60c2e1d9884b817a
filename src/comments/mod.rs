//! The comment collection and its read/write contract.

mod fixture;
pub mod model;
pub mod store;

pub use fixture::{seed_comments, FixtureError};
pub use model::{Comment, CommentPatch, Reply, DEFAULT_AUTHOR};
pub use store::{CommentStore, SharedCommentStore, SubscriptionId};
