#![forbid(unsafe_code)]

//! Input events consumed by the controller and intents it emits.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

bitflags! {
    /// What the host should do with the native event after a handler ran.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventFlags: u8 {
        /// Suppress the platform default action (`preventDefault`).
        const PREVENT_DEFAULT  = 0b01;
        /// Do not deliver the event to ancestors (`stopPropagation`).
        const STOP_PROPAGATION = 0b10;
    }
}

/// Keys the dialog reacts to. Everything else is carried through as `Char`
/// or `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Legacy `"Esc"` is accepted.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn escape() -> Self {
        Self::new(Key::Escape)
    }

    #[must_use]
    pub const fn tab() -> Self {
        Self::new(Key::Tab)
    }

    #[must_use]
    pub const fn shift_tab() -> Self {
        Self::new(Key::Tab).with_modifiers(Modifiers::SHIFT)
    }

    #[inline]
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// A native event delivered through one of the bound listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent<E> {
    Click { target: E },
    MouseDown { target: E },
    MouseUp { target: E },
    KeyDown { target: E, key: KeyEvent },
}

impl<E: Copy> InputEvent<E> {
    /// The element the event was dispatched to.
    #[must_use]
    pub fn target(&self) -> E {
        match *self {
            Self::Click { target }
            | Self::MouseDown { target }
            | Self::MouseUp { target }
            | Self::KeyDown { target, .. } => target,
        }
    }
}

/// Intents emitted by a dialog controller.
///
/// `Close` is a request: the owner decides whether to set `open = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogEvent {
    /// The dialog finished opening and focus moved inside it.
    /// `has_siblings` is true when another dialog of the same registry was
    /// already open.
    Show { has_siblings: bool },
    /// The dialog closed. Carries the same flag as the paired `Show`.
    Hide { has_siblings: bool },
    /// The user asked to dismiss the dialog (Escape, backdrop, close control).
    Close,
}

impl DialogEvent {
    /// Event name as exposed to framework bindings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show { .. } => "show",
            Self::Hide { .. } => "hide",
            Self::Close => "close",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("Tab"), Key::Tab);
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("a"), Key::Char('a'));
        assert_eq!(Key::from_dom_key("é"), Key::Char('é'));
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::Other);
        assert_eq!(Key::from_dom_key(""), Key::Other);
    }

    #[test]
    fn shift_tab_has_shift() {
        assert!(KeyEvent::shift_tab().shift());
        assert!(!KeyEvent::tab().shift());
        let chord = KeyEvent::tab().with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(chord.shift());
    }

    #[test]
    fn input_event_target() {
        let key = InputEvent::KeyDown {
            target: 7_u32,
            key: KeyEvent::escape(),
        };
        assert_eq!(key.target(), 7);
        assert_eq!(InputEvent::Click { target: 3_u32 }.target(), 3);
    }

    #[test]
    fn event_names() {
        assert_eq!(DialogEvent::Show { has_siblings: true }.name(), "show");
        assert_eq!(DialogEvent::Hide { has_siblings: false }.name(), "hide");
        assert_eq!(DialogEvent::Close.name(), "close");
    }
}
