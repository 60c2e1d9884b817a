#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// The badge follows the pointer.
    #[default]
    Tracking,
    /// The badge is frozen at the locked point and the comment draft is open.
    Locked,
}

impl CursorMode {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}
