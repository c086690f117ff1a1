#![forbid(unsafe_code)]

//! Headless, accessible modal dialogs.
//!
//! This crate implements the behavior of a WAI-ARIA modal dialog without
//! owning any markup. A [`DialogController`] computes attribute and listener
//! [`Bindings`] for the elements the host renders (root, backdrop, dialog box,
//! title, close control, optional initial-focus target), interprets keyboard
//! and pointer events, manages focus, and emits intents ([`DialogEvent`]) back
//! to the owner of the `open` flag.
//!
//! # Architecture
//!
//! - [`dom::Document`]: the host's view of its element tree (focus, structure,
//!   scroll lock). The controller only reads and mutates the document through it.
//! - [`DialogController`]: the open/closed state machine for one dialog.
//! - [`DialogRegistry`]: shared state for every dialog of one host (open stack
//!   for sibling detection, reference-counted background scroll lock).
//! - [`Plugin`]: idempotent registration with a host plus prop defaults.
//!
//! # Invariants
//!
//! 1. The controller never flips its own `open` flag; `close` is an intent.
//! 2. `aria-labelledby` of the dialog box always equals the title `id`.
//! 3. Each controller holds at most one scroll-lock reference; the document
//!    style is restored exactly when the last reference is released.
//! 4. The deferred initial-focus step no-ops if the dialog closed (or reopened)
//!    after it was scheduled.
//!
//! # Example
//!
//! ```
//! use a11y_dialog::testing::MockDocument;
//! use a11y_dialog::{AnchorRole, DialogEvent, DialogProps, DialogRegistry, DialogController};
//! use a11y_dialog::dom::{ElementInfo, ElementKind};
//!
//! let mut doc = MockDocument::new();
//! let body = doc.body();
//! let opener = doc.append(body, ElementInfo::new(ElementKind::Button));
//! doc.set_focus(opener);
//!
//! let registry = DialogRegistry::new();
//! let mut dialog = DialogController::mount(DialogProps::new(false), registry, &mut doc);
//! assert!(!dialog.is_open());
//!
//! // The owner opens the dialog and renders the subtree.
//! dialog.set_open(&mut doc, true);
//! let dialog_box = doc.append(body, ElementInfo::new(ElementKind::Generic).tab_index(-1));
//! let ok = doc.append(dialog_box, ElementInfo::new(ElementKind::Button));
//! dialog.attach(AnchorRole::Dialog, dialog_box);
//!
//! // One render pass later, focus moves inside and `show` is emitted.
//! dialog.after_render(&mut doc);
//! assert_eq!(doc.focused(), Some(ok));
//! assert_eq!(dialog.drain_events(), vec![DialogEvent::Show { has_siblings: false }]);
//!
//! // Closing returns focus to the opener.
//! dialog.set_open(&mut doc, false);
//! assert_eq!(doc.focused(), Some(opener));
//! ```

pub mod bindings;
pub mod controller;
pub mod dom;
pub mod error;
pub mod event;
pub mod focus;
pub mod plugin;
pub mod props;
pub mod registry;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use bindings::{AnchorRole, BindingSet, Bindings, EventName, Handler, Listener, compute_bindings};
pub use controller::{DialogController, DialogSlot};
pub use error::DialogError;
pub use event::{DialogEvent, EventFlags, InputEvent, Key, KeyEvent, Modifiers};
pub use plugin::{DEFAULT_COMPONENT_NAME, Host, Plugin, PluginOptions};
pub use props::{DialogLayout, DialogProps, DialogRole, PropDefaults, PropOverrides};
pub use registry::{DialogRegistry, InstanceId};
