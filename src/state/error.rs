use super::event::CursorEvent;
use super::model::CursorMode;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid cursor transition: from {from:?} using event {event:?}")]
    InvalidStateTransition { from: CursorMode, event: CursorEvent },
    #[error("comment draft is empty")]
    EmptyDraft,
}
