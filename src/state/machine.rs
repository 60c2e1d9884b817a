use super::error::{StateError, StateResult};
use super::{event::StateTransition, CursorEvent, CursorMode};

/// Most recent lifecycle transitions kept for inspection.
const HISTORY_LIMIT: usize = 64;

#[derive(Debug)]
pub struct CursorLockMachine {
    mode: CursorMode,
    transition_history: Vec<StateTransition>,
}

impl CursorLockMachine {
    pub fn new() -> Self {
        Self {
            mode: CursorMode::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode.is_locked()
    }

    pub fn can_transition(&self, event: CursorEvent) -> bool {
        self.next_mode(event).is_some()
    }

    pub fn next_mode(&self, event: CursorEvent) -> Option<CursorMode> {
        use CursorEvent::*;
        match (self.mode, event) {
            (_, Teardown) => Some(CursorMode::Tracking),
            (CursorMode::Tracking, PointerMove | PointerLeave) => Some(CursorMode::Tracking),
            (CursorMode::Tracking, Click) => Some(CursorMode::Locked),
            (CursorMode::Locked, PointerMove | PointerLeave) => Some(CursorMode::Locked),
            (CursorMode::Locked, Click | Cancel | Submit) => Some(CursorMode::Tracking),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: CursorEvent) -> StateResult<CursorMode> {
        let next = self.next_mode(event).ok_or_else(|| {
            let from = self.mode;
            tracing::warn!(from = ?from, event = ?event, "invalid cursor transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        // Pointer motion is too frequent to keep; only lock lifecycle events are recorded.
        if !matches!(event, CursorEvent::PointerMove | CursorEvent::PointerLeave) {
            tracing::debug!(from = ?self.mode, event = ?event, to = ?next, "cursor transition");
            self.transition_history
                .push(StateTransition::new(self.mode, event, next));
            if self.transition_history.len() > HISTORY_LIMIT {
                let overflow = self.transition_history.len() - HISTORY_LIMIT;
                self.transition_history.drain(..overflow);
            }
        }
        self.mode = next;

        Ok(self.mode)
    }

    /// Lifecycle transitions, oldest first, capped at the most recent
    /// `HISTORY_LIMIT`.
    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for CursorLockMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CursorLockMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CursorMode::{:?}", self.mode)
    }
}
