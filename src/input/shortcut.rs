#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    /// A text field (reply, edit) owns the keyboard.
    pub text_input_active: bool,
    pub cursor_locked: bool,
    pub can_submit_draft: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleCommentMode,
    ToggleInbox,
    ToggleMenu,
    CancelDraft,
    SubmitDraft,
}

fn resolve_locked_shortcut(key: ShortcutKey, context: InputContext) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Escape => Some(ShortcutAction::CancelDraft),
        ShortcutKey::Enter if context.can_submit_draft => Some(ShortcutAction::SubmitDraft),
        _ => None,
    }
}

fn resolve_toolbar_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Character('k'), true, false) => Some(ShortcutAction::ToggleMenu),
        (ShortcutKey::Character('c'), false, false) => Some(ShortcutAction::ToggleCommentMode),
        (ShortcutKey::Character('i'), false, false) => Some(ShortcutAction::ToggleInbox),
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.cursor_locked {
        return resolve_locked_shortcut(key, context);
    }

    if context.text_input_active {
        return None;
    }

    let key = match key {
        ShortcutKey::Character(ch) => ShortcutKey::Character(ch.to_ascii_lowercase()),
        other => other,
    };
    resolve_toolbar_shortcut(key, modifiers)
}
