#![forbid(unsafe_code)]

//! The host document as seen by the dialog controller.
//!
//! The controller never owns elements. Hosts implement [`Document`] over
//! whatever tree they render into (a browser DOM through `web-sys`, a retained
//! widget tree, or [`crate::testing::MockDocument`] in tests) and describe each
//! element's focus-relevant facts with an [`ElementInfo`].
//!
//! # Focusability
//!
//! [`ElementInfo::is_tabbable`] mirrors the selector list used by accessible
//! dialog implementations on the web:
//!
//! | Element | Tabbable when |
//! |---------|---------------|
//! | `a`, `area` | has `href` |
//! | `input`, `select`, `textarea`, `button` | not disabled |
//! | `iframe` | always |
//! | `audio`, `video` | has `controls` |
//! | any | `contenteditable` or `tabindex >= 0` |
//!
//! In every case the element must be rendered, not inert, and must not carry a
//! negative `tabindex`.

use std::fmt;

/// Element kinds that matter for focus decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// `<a>`; `href` tells whether the link has a target.
    Anchor { href: bool },
    /// `<area>` of an image map.
    Area { href: bool },
    Button,
    Input,
    Select,
    TextArea,
    IFrame,
    Audio { controls: bool },
    Video { controls: bool },
    /// Anything else (`div`, `h1`, `section`, ...).
    #[default]
    Generic,
}

impl ElementKind {
    /// Form controls honor the `disabled` attribute.
    #[must_use]
    pub const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Select | Self::TextArea
        )
    }

    /// Whether the element participates in sequential focus navigation
    /// without an explicit `tabindex`.
    #[must_use]
    pub const fn is_natively_tabbable(self) -> bool {
        match self {
            Self::Anchor { href } | Self::Area { href } => href,
            Self::Audio { controls } | Self::Video { controls } => controls,
            Self::Button | Self::Input | Self::Select | Self::TextArea | Self::IFrame => true,
            Self::Generic => false,
        }
    }
}

/// Focus-relevant facts about one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub kind: ElementKind,
    /// Parsed `tabindex` attribute, if present.
    pub tab_index: Option<i32>,
    pub disabled: bool,
    /// Inside an `inert` subtree.
    pub inert: bool,
    /// Has a layout box (not `display: none`, not `hidden`, non-zero size).
    pub rendered: bool,
    /// Carries the `autofocus` marker.
    pub autofocus: bool,
    pub content_editable: bool,
    /// The `type` attribute of an `<input>` (lowercase), if any.
    pub input_type: Option<String>,
    /// Current value of a text-like control.
    pub value: String,
}

impl Default for ElementInfo {
    fn default() -> Self {
        Self {
            kind: ElementKind::Generic,
            tab_index: None,
            disabled: false,
            inert: false,
            rendered: true,
            autofocus: false,
            content_editable: false,
            input_type: None,
            value: String::new(),
        }
    }
}

impl ElementInfo {
    /// A rendered element of the given kind with no attributes set.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// An `<input>` of the given `type`.
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self::new(ElementKind::Input).input_type(input_type)
    }

    #[must_use]
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn inert(mut self) -> Self {
        self.inert = true;
        self
    }

    /// Mark the element as not rendered.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.rendered = false;
        self
    }

    #[must_use]
    pub fn autofocus(mut self) -> Self {
        self.autofocus = true;
        self
    }

    #[must_use]
    pub fn content_editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    #[must_use]
    pub fn input_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_ascii_lowercase());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Rendered and not inert.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.rendered && !self.inert
    }

    /// Whether the element takes part in Tab / Shift+Tab navigation.
    #[must_use]
    pub fn is_tabbable(&self) -> bool {
        if !self.is_interactive() {
            return false;
        }
        if self.kind.is_form_control() && self.disabled {
            return false;
        }
        match self.tab_index {
            Some(index) if index < 0 => false,
            Some(_) => true,
            None => self.kind.is_natively_tabbable() || self.content_editable,
        }
    }

    /// Whether `focus()` would succeed: tabbable elements plus anything with a
    /// `tabindex` (including `-1`).
    #[must_use]
    pub fn can_receive_focus(&self) -> bool {
        if !self.is_interactive() {
            return false;
        }
        if self.kind.is_form_control() && self.disabled {
            return false;
        }
        self.tab_index.is_some() || self.kind.is_natively_tabbable() || self.content_editable
    }

    /// A `type=search` input holding text. Escape in such a field clears the
    /// field instead of closing the dialog.
    #[must_use]
    pub fn is_search_with_text(&self) -> bool {
        self.kind == ElementKind::Input
            && self.input_type.as_deref() == Some("search")
            && !self.value.is_empty()
    }
}

/// The host document.
///
/// `Element` is a cheap handle (an index, a generational key, a `JsValue`
/// wrapper id). All tree queries are in document order.
pub trait Document {
    type Element: Copy + Eq + fmt::Debug;

    /// The element that currently has keyboard focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Move focus to `element`. Returns `false` if the element cannot take focus
    /// (detached, hidden, inert, disabled, or not focusable).
    fn focus(&mut self, element: Self::Element) -> bool;

    /// Whether `element` is still attached to the document.
    fn contains(&self, element: Self::Element) -> bool;

    /// Whether `element` is `root` or one of its descendants.
    fn is_within(&self, root: Self::Element, element: Self::Element) -> bool;

    /// Append the descendants of `root` (excluding `root`) to `out` in
    /// document order.
    fn descendants(&self, root: Self::Element, out: &mut Vec<Self::Element>);

    /// Focus-relevant facts for `element`, or `None` if it is unknown.
    fn element_info(&self, element: Self::Element) -> Option<ElementInfo>;

    /// Current value of the document-level overflow style used for the
    /// background scroll lock (`None` when unset).
    fn scroll_lock_style(&self) -> Option<String>;

    /// Set (or with `None`, remove) the document-level overflow style.
    fn set_scroll_lock_style(&mut self, value: Option<&str>);
}
