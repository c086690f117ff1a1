#![forbid(unsafe_code)]

//! Attribute and listener bindings for the dialog's anchor elements.
//!
//! A renderless dialog does not produce markup. Instead, the host spreads one
//! [`BindingSet`] onto each element it renders for an [`AnchorRole`]:
//!
//! ```text
//! root (data-id)                      Wrapped layout
//! ├── backdrop (data-ref=backdrop)
//! └── dialog   (role, aria-modal, aria-labelledby)
//!     ├── title (id)
//!     ├── close (aria-label)
//!     └── focus (optional initial-focus target)
//! ```
//!
//! With [`DialogLayout::BackdropRoot`] the backdrop is the outermost element,
//! carries `data-id`, and contains the dialog box.
//!
//! # Invariants
//!
//! - `dialog["aria-labelledby"] == title["id"]`.
//! - `data-id` and the dialog `id` both equal the instance token.
//! - [`compute_bindings`] is pure: the same props and instance always yield
//!   the same bindings.

use std::fmt;

use ahash::AHashMap;

use crate::props::{DialogLayout, DialogProps};
use crate::registry::InstanceId;

/// Element roles the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorRole {
    Root,
    Backdrop,
    Dialog,
    Title,
    Close,
    /// Optional element that receives initial focus.
    Focus,
}

impl AnchorRole {
    pub const ALL: [Self; 6] = [
        Self::Root,
        Self::Backdrop,
        Self::Dialog,
        Self::Title,
        Self::Close,
        Self::Focus,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Backdrop => "backdrop",
            Self::Dialog => "dialog",
            Self::Title => "title",
            Self::Close => "close",
            Self::Focus => "focus",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native events a binding listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Click,
    KeyDown,
    MouseDown,
    MouseUp,
}

impl EventName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
        }
    }
}

/// Controller entry points a listener routes to.
///
/// Hosts call [`crate::DialogController::dispatch`] with the handler found in
/// the listener map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    BackdropClick,
    CaptureMouseDown,
    CaptureMouseUp,
    CloseControlClick,
    HandleKeyboard,
    StopPropagation,
}

/// One event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listener {
    pub handler: Handler,
    /// Register in the capture phase.
    pub capture: bool,
}

impl Listener {
    const fn bubble(handler: Handler) -> Self {
        Self {
            handler,
            capture: false,
        }
    }

    const fn capture(handler: Handler) -> Self {
        Self {
            handler,
            capture: true,
        }
    }
}

/// Attributes and listeners for one anchor element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    pub props: AHashMap<&'static str, String>,
    pub listeners: AHashMap<EventName, Listener>,
}

impl BindingSet {
    fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.props.insert(name, value.into());
    }

    fn on(&mut self, event: EventName, listener: Listener) {
        self.listeners.insert(event, listener);
    }

    /// Value of attribute `name`, if bound.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn listener(&self, event: EventName) -> Option<Listener> {
        self.listeners.get(&event).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.listeners.is_empty()
    }
}

/// Bindings for every anchor role of one dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub root: BindingSet,
    pub backdrop: BindingSet,
    pub dialog: BindingSet,
    pub title: BindingSet,
    pub close: BindingSet,
    pub focus: BindingSet,
}

impl Bindings {
    #[must_use]
    pub fn get(&self, role: AnchorRole) -> &BindingSet {
        match role {
            AnchorRole::Root => &self.root,
            AnchorRole::Backdrop => &self.backdrop,
            AnchorRole::Dialog => &self.dialog,
            AnchorRole::Title => &self.title,
            AnchorRole::Close => &self.close,
            AnchorRole::Focus => &self.focus,
        }
    }
}

/// The token that identifies one instance: the `id` override or
/// `<id_prefix>-<instance>`.
#[must_use]
pub fn instance_token(props: &DialogProps, instance: InstanceId) -> String {
    match &props.id {
        Some(id) => id.clone(),
        None => format!("{}-{}", props.id_prefix, instance),
    }
}

/// Id of the title element: the `title_id` override or `<token>-title`.
#[must_use]
pub fn title_id(props: &DialogProps, instance: InstanceId) -> String {
    match &props.title_id {
        Some(id) => id.clone(),
        None => format!("{}-title", instance_token(props, instance)),
    }
}

/// Compute the bindings of every anchor role.
#[must_use]
pub fn compute_bindings(props: &DialogProps, instance: InstanceId) -> Bindings {
    let token = instance_token(props, instance);
    let title = title_id(props, instance);
    let mut bindings = Bindings::default();

    match props.layout {
        DialogLayout::Wrapped => bindings.root.set("data-id", token.clone()),
        DialogLayout::BackdropRoot => bindings.backdrop.set("data-id", token.clone()),
    }

    let backdrop = &mut bindings.backdrop;
    backdrop.set("data-ref", "backdrop");
    backdrop.set("tabindex", "-1");
    backdrop.on(EventName::Click, Listener::bubble(Handler::BackdropClick));
    backdrop.on(
        EventName::MouseDown,
        Listener::capture(Handler::CaptureMouseDown),
    );
    backdrop.on(EventName::MouseUp, Listener::bubble(Handler::CaptureMouseUp));

    let dialog = &mut bindings.dialog;
    dialog.set("data-ref", "dialog");
    dialog.set("id", token);
    dialog.set("role", props.role.as_str());
    dialog.set("aria-modal", "true");
    dialog.set("aria-labelledby", title.clone());
    dialog.set("tabindex", "-1");
    dialog.on(EventName::Click, Listener::bubble(Handler::StopPropagation));
    dialog.on(EventName::KeyDown, Listener::bubble(Handler::HandleKeyboard));

    bindings.title.set("data-ref", "title");
    bindings.title.set("id", title);

    let close = &mut bindings.close;
    close.set("data-ref", "close");
    close.set("type", "button");
    close.set("aria-label", props.close_button_label.clone());
    close.on(
        EventName::Click,
        Listener::bubble(Handler::CloseControlClick),
    );

    bindings.focus.set("data-ref", "focus");

    bindings
}
