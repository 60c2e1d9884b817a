use super::model::CursorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    PointerMove,
    PointerLeave,
    Click,
    Cancel,
    Submit,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: CursorMode,
    pub event: CursorEvent,
    pub to: CursorMode,
}

impl StateTransition {
    pub const fn new(from: CursorMode, event: CursorEvent, to: CursorMode) -> Self {
        Self { from, event, to }
    }
}
