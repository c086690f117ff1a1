#![forbid(unsafe_code)]

//! The dialog state machine.
//!
//! A [`DialogController`] has two states, closed and open, and moves between
//! them only when its owner changes `open` through [`DialogController::set_open`]
//! or [`DialogController::update_props`]. User dismissal (Escape, backdrop
//! click, close control) is reported as [`DialogEvent::Close`]; the owner
//! decides whether to act on it.
//!
//! # Lifecycle
//!
//! ```text
//! closed ──open=true──▶ open (focus pending) ──after_render──▶ open (shown)
//!   ▲                        │                                     │
//!   └────────open=false──────┴─────────────open=false──────────────┘
//! ```
//!
//! Opening records the focused element, takes a scroll-lock reference,
//! registers the instance in the [`DialogRegistry`], and schedules the
//! initial-focus step. The host runs that step with
//! [`DialogController::after_render`] once the dialog subtree is rendered and
//! attached. Closing emits `Hide` (only if `Show` was emitted), releases the
//! lock, unregisters, and returns focus to the recorded element.
//!
//! # Invariants
//!
//! - Each controller holds at most one scroll-lock reference.
//! - The focus step is keyed by a generation counter; a step scheduled before
//!   a close never runs.
//! - `Show` and `Hide` are paired and carry the same `has_siblings` flag.
//!
//! # Failure Modes
//!
//! - No dialog box attached at render time: nothing is focused, `Show` is
//!   still emitted.
//! - The recorded opener left the document: focus is not restored.
//! - Closed while another dialog of the registry opened later is still open:
//!   focus stays in that dialog instead of returning to this opener.
//! - Dropped while open without [`DialogController::unmount`]: the instance
//!   is unregistered and its lock reference released, but the document style
//!   is only restored by the next lock release or
//!   [`DialogRegistry::reconcile`].

use std::fmt;

use tracing::{debug, trace, warn};

use crate::bindings::{AnchorRole, Bindings, Handler, compute_bindings};
use crate::dom::Document;
use crate::event::{DialogEvent, EventFlags, InputEvent, Key, KeyEvent};
use crate::focus;
use crate::props::DialogProps;
use crate::registry::{DialogRegistry, InstanceId};

/// Everything a host needs to render one dialog: whether the subtree should
/// exist and what to spread onto each anchor element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSlot {
    pub open: bool,
    pub bindings: Bindings,
}

#[derive(Debug, Clone)]
struct DialogState<E> {
    open: bool,
    previously_focused: Option<E>,
    mouse_down_origin: Option<E>,
    /// Set by a drag onto or off the backdrop; swallows the next click.
    suppress_backdrop_click: bool,
    /// Captured when opening, reused for `Hide`.
    has_siblings: bool,
    shown: bool,
    holds_scroll_lock: bool,
    generation: u64,
    pending_focus: Option<u64>,
}

impl<E> Default for DialogState<E> {
    fn default() -> Self {
        Self {
            open: false,
            previously_focused: None,
            mouse_down_origin: None,
            suppress_backdrop_click: false,
            has_siblings: false,
            shown: false,
            holds_scroll_lock: false,
            generation: 0,
            pending_focus: None,
        }
    }
}

/// Headless controller for one modal dialog.
pub struct DialogController<E: Copy + Eq + fmt::Debug> {
    id: InstanceId,
    props: DialogProps,
    registry: DialogRegistry,
    anchors: [Option<E>; AnchorRole::ALL.len()],
    state: DialogState<E>,
    events: Vec<DialogEvent>,
}

impl<E: Copy + Eq + fmt::Debug> fmt::Debug for DialogController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogController")
            .field("id", &self.id)
            .field("open", &self.state.open)
            .field("shown", &self.state.shown)
            .field("has_siblings", &self.state.has_siblings)
            .field("holds_scroll_lock", &self.state.holds_scroll_lock)
            .finish_non_exhaustive()
    }
}

impl<E: Copy + Eq + fmt::Debug> DialogController<E> {
    /// Create a controller. If `props.open` is set, the open transition runs
    /// immediately (the focus step still waits for [`Self::after_render`]).
    pub fn mount<D>(props: DialogProps, registry: DialogRegistry, doc: &mut D) -> Self
    where
        D: Document<Element = E>,
    {
        let open = props.open;
        let mut controller = Self {
            id: InstanceId::next(),
            props,
            registry,
            anchors: [None; AnchorRole::ALL.len()],
            state: DialogState::default(),
            events: Vec::new(),
        };
        debug!(instance = %controller.id, open, "dialog mounted");
        if open {
            controller.open_transition(doc);
        }
        controller
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn props(&self) -> &DialogProps {
        &self.props
    }

    #[must_use]
    pub fn registry(&self) -> &DialogRegistry {
        &self.registry
    }

    /// Whether the dialog is open (its subtree should be rendered).
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Whether `Show` was emitted for the current open period.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.state.shown
    }

    /// The element focused when the dialog opened.
    #[must_use]
    pub fn previously_focused(&self) -> Option<E> {
        self.state.previously_focused
    }

    /// Target of the last captured mouse-down, until the matching mouse-up.
    #[must_use]
    pub fn mouse_down_origin(&self) -> Option<E> {
        self.state.mouse_down_origin
    }

    /// Sibling flag captured when the dialog last opened.
    #[must_use]
    pub fn has_siblings(&self) -> bool {
        self.state.has_siblings
    }

    #[must_use]
    pub fn holds_scroll_lock(&self) -> bool {
        self.state.holds_scroll_lock
    }

    /// Whether the initial-focus step is scheduled.
    #[must_use]
    pub fn has_pending_focus(&self) -> bool {
        self.state.pending_focus.is_some()
    }

    // --- Anchors and bindings ---

    /// Record the element the host spread `role`'s bindings onto.
    pub fn attach(&mut self, role: AnchorRole, element: E) {
        trace!(instance = %self.id, %role, element = ?element, "anchor attached");
        self.anchors[role.index()] = Some(element);
    }

    pub fn detach(&mut self, role: AnchorRole) -> Option<E> {
        self.anchors[role.index()].take()
    }

    #[must_use]
    pub fn anchor(&self, role: AnchorRole) -> Option<E> {
        self.anchors[role.index()]
    }

    /// Bindings for the current props.
    #[must_use]
    pub fn bindings(&self) -> Bindings {
        compute_bindings(&self.props, self.id)
    }

    /// The render input: `open` plus the bindings.
    #[must_use]
    pub fn slot(&self) -> DialogSlot {
        DialogSlot {
            open: self.state.open,
            bindings: self.bindings(),
        }
    }

    /// Take the events emitted since the last call, in emission order.
    pub fn drain_events(&mut self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Owner-driven transitions ---

    /// Apply a new `open` value. Same-value updates do nothing.
    pub fn set_open<D>(&mut self, doc: &mut D, open: bool)
    where
        D: Document<Element = E>,
    {
        self.props.open = open;
        self.sync_open(doc);
    }

    /// Replace all props.
    ///
    /// While open, toggling `prevent_background_scrolling` takes or releases
    /// the scroll-lock reference right away.
    pub fn update_props<D>(&mut self, doc: &mut D, props: DialogProps)
    where
        D: Document<Element = E>,
    {
        self.props = props;
        if self.state.open && self.props.open {
            match (
                self.state.holds_scroll_lock,
                self.props.prevent_background_scrolling,
            ) {
                (false, true) => self.acquire_scroll_lock(doc),
                (true, false) => self.release_scroll_lock(doc),
                _ => {}
            }
        }
        self.sync_open(doc);
    }

    fn sync_open<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        match (self.state.open, self.props.open) {
            (false, true) => self.open_transition(doc),
            (true, false) => self.close_transition(doc, true),
            _ => {}
        }
    }

    fn open_transition<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        let state = &mut self.state;
        state.open = true;
        state.shown = false;
        state.previously_focused = doc.active_element();
        state.mouse_down_origin = None;
        state.suppress_backdrop_click = false;

        if self.props.prevent_background_scrolling {
            self.acquire_scroll_lock(doc);
        }
        self.state.has_siblings = self.registry.mark_open(self.id);

        self.state.generation = self.state.generation.wrapping_add(1);
        self.state.pending_focus = Some(self.state.generation);

        debug!(
            instance = %self.id,
            has_siblings = self.state.has_siblings,
            previously_focused = ?self.state.previously_focused,
            generation = self.state.generation,
            "dialog opened"
        );
    }

    fn close_transition<D>(&mut self, doc: &mut D, emit: bool)
    where
        D: Document<Element = E>,
    {
        self.state.open = false;
        self.state.pending_focus = None;
        if emit && self.state.shown {
            self.events.push(DialogEvent::Hide {
                has_siblings: self.state.has_siblings,
            });
        }
        self.state.shown = false;

        self.release_scroll_lock(doc);
        let was_top = self.registry.top() == Some(self.id);
        self.registry.mark_closed(self.id);

        if let Some(previous) = self.state.previously_focused.take() {
            if !was_top {
                // A dialog above this one still owns focus.
                debug!(
                    instance = %self.id,
                    top = ?self.registry.top(),
                    "closed below another dialog, focus not restored"
                );
            } else if doc.contains(previous) {
                doc.focus(previous);
            } else {
                debug!(instance = %self.id, element = ?previous, "opener left the document, focus not restored");
            }
        }
        self.state.mouse_down_origin = None;
        self.state.suppress_backdrop_click = false;

        debug!(instance = %self.id, has_siblings = self.state.has_siblings, "dialog closed");
    }

    fn acquire_scroll_lock<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        if !self.state.holds_scroll_lock {
            self.registry.lock_scroll(doc);
            self.state.holds_scroll_lock = true;
        }
    }

    fn release_scroll_lock<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        if self.state.holds_scroll_lock {
            self.registry.unlock_scroll(doc);
            self.state.holds_scroll_lock = false;
        }
    }

    // --- Deferred focus ---

    /// Run the initial-focus step scheduled by the last open transition.
    ///
    /// Call once the dialog subtree is rendered and its anchors attached.
    /// Returns `false` when no step is pending for the current open period.
    pub fn after_render<D>(&mut self, doc: &mut D) -> bool
    where
        D: Document<Element = E>,
    {
        let Some(scheduled) = self.state.pending_focus.take() else {
            return false;
        };
        if !self.state.open || scheduled != self.state.generation {
            trace!(instance = %self.id, scheduled, current = self.state.generation, "stale focus step");
            return false;
        }

        let dialog = self.anchor(AnchorRole::Dialog);
        let focus_ref = self.anchor(AnchorRole::Focus);
        match focus::focus_initial(doc, dialog, focus_ref) {
            Some((element, rule)) => {
                debug!(instance = %self.id, element = ?element, ?rule, "initial focus");
            }
            None => {
                debug!(instance = %self.id, "no dialog box attached, initial focus skipped");
            }
        }

        self.state.shown = true;
        self.events.push(DialogEvent::Show {
            has_siblings: self.state.has_siblings,
        });
        true
    }

    // --- Event handlers ---

    /// Keydown on the dialog box: Escape dismisses, Tab is trapped.
    pub fn handle_keyboard<D>(&mut self, doc: &mut D, key: &KeyEvent) -> EventFlags
    where
        D: Document<Element = E>,
    {
        if !self.state.open {
            return EventFlags::empty();
        }
        match key.key {
            Key::Escape => {
                let in_search = doc
                    .active_element()
                    .and_then(|el| doc.element_info(el))
                    .is_some_and(|info| info.is_search_with_text());
                if in_search {
                    trace!(instance = %self.id, "escape left to search field");
                    return EventFlags::STOP_PROPAGATION;
                }
                trace!(instance = %self.id, "escape, close requested");
                self.events.push(DialogEvent::Close);
                EventFlags::PREVENT_DEFAULT | EventFlags::STOP_PROPAGATION
            }
            Key::Tab => {
                let Some(dialog) = self.anchor(AnchorRole::Dialog) else {
                    return EventFlags::empty();
                };
                let target = focus::tab_target(doc, dialog, doc.active_element(), key.shift());
                trace!(instance = %self.id, backwards = key.shift(), target = ?target, "tab trapped");
                doc.focus(target);
                EventFlags::PREVENT_DEFAULT | EventFlags::STOP_PROPAGATION
            }
            _ => EventFlags::empty(),
        }
    }

    /// Capture-phase mouse-down on the backdrop (and everything inside it).
    pub fn capture_mouse_down(&mut self, target: E) {
        if !self.state.open {
            return;
        }
        self.state.mouse_down_origin = Some(target);
        self.state.suppress_backdrop_click = false;
    }

    /// Mouse-up on the backdrop (or bubbling through it). A backdrop click
    /// counts only when press and release both hit the backdrop; a drag in
    /// either direction between the backdrop and anything else is not a click.
    pub fn capture_mouse_up(&mut self, target: E) {
        if !self.state.open {
            return;
        }
        let Some(origin) = self.state.mouse_down_origin.take() else {
            return;
        };
        let Some(backdrop) = self.anchor(AnchorRole::Backdrop) else {
            return;
        };
        if origin != target && (origin == backdrop || target == backdrop) {
            trace!(instance = %self.id, origin = ?origin, target = ?target, "drag across backdrop edge");
            self.state.suppress_backdrop_click = true;
        }
    }

    /// Click on the backdrop.
    pub fn on_backdrop_click<D>(&mut self, doc: &D, target: E)
    where
        D: Document<Element = E>,
    {
        if !self.state.open {
            return;
        }
        if std::mem::take(&mut self.state.suppress_backdrop_click) {
            trace!(instance = %self.id, "backdrop click suppressed after drag");
            return;
        }
        if let Some(dialog) = self.anchor(AnchorRole::Dialog)
            && doc.is_within(dialog, target)
        {
            return;
        }
        self.events.push(DialogEvent::Close);
    }

    pub fn on_close_control_click(&mut self) {
        if self.state.open {
            self.events.push(DialogEvent::Close);
        }
    }

    /// Click on the dialog box: keep it away from the backdrop.
    #[must_use]
    pub fn stop_propagation(&self) -> EventFlags {
        EventFlags::STOP_PROPAGATION
    }

    /// Route a native event to the handler named by a listener.
    pub fn dispatch<D>(&mut self, doc: &mut D, handler: Handler, event: &InputEvent<E>) -> EventFlags
    where
        D: Document<Element = E>,
    {
        match (handler, *event) {
            (Handler::BackdropClick, InputEvent::Click { target }) => {
                self.on_backdrop_click(doc, target);
                EventFlags::empty()
            }
            (Handler::CaptureMouseDown, InputEvent::MouseDown { target }) => {
                self.capture_mouse_down(target);
                EventFlags::empty()
            }
            (Handler::CaptureMouseUp, InputEvent::MouseUp { target }) => {
                self.capture_mouse_up(target);
                EventFlags::empty()
            }
            (Handler::CloseControlClick, InputEvent::Click { .. }) => {
                self.on_close_control_click();
                EventFlags::empty()
            }
            (Handler::HandleKeyboard, InputEvent::KeyDown { key, .. }) => {
                self.handle_keyboard(doc, &key)
            }
            (Handler::StopPropagation, _) => self.stop_propagation(),
            (handler, event) => {
                trace!(instance = %self.id, ?handler, ?event, "event kind does not match handler");
                EventFlags::empty()
            }
        }
    }

    // --- Teardown ---

    /// Tear down without emitting events. Safe to call more than once.
    pub fn unmount<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E>,
    {
        if self.state.open {
            self.close_transition(doc, false);
        }
        self.anchors = [None; AnchorRole::ALL.len()];
        self.events.clear();
        trace!(instance = %self.id, "dialog unmounted");
    }
}

impl<E: Copy + Eq + fmt::Debug> Drop for DialogController<E> {
    fn drop(&mut self) {
        self.registry.mark_closed(self.id);
        if self.state.holds_scroll_lock {
            warn!(
                instance = %self.id,
                "dialog dropped while holding the scroll lock; call unmount to restore the document"
            );
            self.registry.forget_scroll_lock();
            self.state.holds_scroll_lock = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementInfo, ElementKind};
    use crate::testing::{MockDocument, NodeId};

    struct Fixture {
        doc: MockDocument,
        opener: NodeId,
        backdrop: NodeId,
        dialog: NodeId,
        close: NodeId,
        input: NodeId,
    }

    /// body > [opener, backdrop, dialog > [close, input]]
    fn fixture() -> Fixture {
        let mut doc = MockDocument::new();
        let body = doc.body();
        let opener = doc.append(body, ElementInfo::new(ElementKind::Button));
        let backdrop = doc.append(body, ElementInfo::new(ElementKind::Generic).tab_index(-1));
        let dialog = doc.append(body, ElementInfo::new(ElementKind::Generic).tab_index(-1));
        let close = doc.append(dialog, ElementInfo::new(ElementKind::Button));
        let input = doc.append(dialog, ElementInfo::input("text"));
        doc.set_focus(opener);
        Fixture {
            doc,
            opener,
            backdrop,
            dialog,
            close,
            input,
        }
    }

    fn open(fx: &mut Fixture) -> DialogController<NodeId> {
        let mut ctl = DialogController::mount(DialogProps::new(true), DialogRegistry::new(), &mut fx.doc);
        ctl.attach(AnchorRole::Backdrop, fx.backdrop);
        ctl.attach(AnchorRole::Dialog, fx.dialog);
        assert!(ctl.after_render(&mut fx.doc));
        ctl
    }

    #[test]
    fn mount_closed_does_nothing() {
        let mut fx = fixture();
        let mut ctl = DialogController::mount(DialogProps::new(false), DialogRegistry::new(), &mut fx.doc);
        assert!(!ctl.is_open());
        assert!(!ctl.slot().open);
        assert!(!ctl.after_render(&mut fx.doc));
        assert!(ctl.drain_events().is_empty());
        assert_eq!(fx.doc.scroll_lock_style(), None);
    }

    #[test]
    fn open_focuses_first_and_emits_show() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        assert_eq!(fx.doc.focused(), Some(fx.close));
        assert_eq!(ctl.previously_focused(), Some(fx.opener));
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Show { has_siblings: false }]);
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn close_emits_hide_and_restores_focus() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        ctl.set_open(&mut fx.doc, false);
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Hide { has_siblings: false }]);
        assert_eq!(fx.doc.focused(), Some(fx.opener));
        assert_eq!(ctl.previously_focused(), None);
        assert!(!ctl.registry().is_open(ctl.instance_id()));
    }

    #[test]
    fn same_value_updates_are_noops() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();
        ctl.set_open(&mut fx.doc, true);
        assert!(!ctl.has_pending_focus());
        assert!(ctl.drain_events().is_empty());
        assert_eq!(ctl.registry().scroll_lock_count(), 1);
    }

    #[test]
    fn close_before_render_emits_nothing() {
        let mut fx = fixture();
        let mut ctl = DialogController::mount(DialogProps::new(true), DialogRegistry::new(), &mut fx.doc);
        ctl.attach(AnchorRole::Dialog, fx.dialog);
        ctl.set_open(&mut fx.doc, false);
        assert!(!ctl.after_render(&mut fx.doc));
        assert!(ctl.drain_events().is_empty());
        assert_eq!(fx.doc.focused(), Some(fx.opener));
    }

    #[test]
    fn escape_requests_close_only() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        let flags = ctl.handle_keyboard(&mut fx.doc, &KeyEvent::escape());
        assert_eq!(flags, EventFlags::PREVENT_DEFAULT | EventFlags::STOP_PROPAGATION);
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
        // The owner has not closed it.
        assert!(ctl.is_open());
    }

    #[test]
    fn escape_in_search_field_with_text_is_ignored() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();
        fx.doc.set_info(fx.input, ElementInfo::input("search").value("query"));
        fx.doc.set_focus(fx.input);

        let flags = ctl.handle_keyboard(&mut fx.doc, &KeyEvent::escape());
        assert_eq!(flags, EventFlags::STOP_PROPAGATION);
        assert!(ctl.drain_events().is_empty());

        fx.doc.set_value(fx.input, "");
        ctl.handle_keyboard(&mut fx.doc, &KeyEvent::escape());
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut fx = fixture();
        let mut ctl = DialogController::mount(DialogProps::new(false), DialogRegistry::new(), &mut fx.doc);
        ctl.attach(AnchorRole::Dialog, fx.dialog);
        assert!(ctl.handle_keyboard(&mut fx.doc, &KeyEvent::escape()).is_empty());
        assert!(ctl.handle_keyboard(&mut fx.doc, &KeyEvent::tab()).is_empty());
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn tab_wraps_inside_dialog() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);

        ctl.handle_keyboard(&mut fx.doc, &KeyEvent::tab());
        assert_eq!(fx.doc.focused(), Some(fx.input));
        ctl.handle_keyboard(&mut fx.doc, &KeyEvent::tab());
        assert_eq!(fx.doc.focused(), Some(fx.close));
        let flags = ctl.handle_keyboard(&mut fx.doc, &KeyEvent::shift_tab());
        assert_eq!(fx.doc.focused(), Some(fx.input));
        assert!(flags.contains(EventFlags::PREVENT_DEFAULT));
    }

    #[test]
    fn other_keys_pass_through() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        let flags = ctl.handle_keyboard(&mut fx.doc, &KeyEvent::new(Key::Char('a')));
        assert!(flags.is_empty());
        assert_eq!(fx.doc.focused(), Some(fx.close));
    }

    #[test]
    fn drag_from_dialog_to_backdrop_does_not_close() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        ctl.capture_mouse_down(fx.input);
        assert_eq!(ctl.mouse_down_origin(), Some(fx.input));
        ctl.capture_mouse_up(fx.backdrop);
        assert_eq!(ctl.mouse_down_origin(), None);
        ctl.on_backdrop_click(&fx.doc, fx.backdrop);
        assert!(ctl.drain_events().is_empty());

        // Suppression is consumed by that one click.
        ctl.on_backdrop_click(&fx.doc, fx.backdrop);
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
    }

    #[test]
    fn drag_from_backdrop_into_dialog_does_not_close() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        ctl.capture_mouse_down(fx.backdrop);
        ctl.capture_mouse_up(fx.input);
        ctl.on_backdrop_click(&fx.doc, fx.backdrop);
        assert!(ctl.drain_events().is_empty());

        // Press and release inside the dialog box arms nothing.
        ctl.capture_mouse_down(fx.input);
        ctl.capture_mouse_up(fx.close);
        ctl.on_backdrop_click(&fx.doc, fx.backdrop);
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
    }

    #[test]
    fn press_and_release_on_backdrop_closes() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        ctl.capture_mouse_down(fx.backdrop);
        ctl.capture_mouse_up(fx.backdrop);
        ctl.on_backdrop_click(&fx.doc, fx.backdrop);
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
    }

    #[test]
    fn click_inside_dialog_box_is_not_a_backdrop_click() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();
        ctl.on_backdrop_click(&fx.doc, fx.close);
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn close_control_requests_close() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();
        ctl.on_close_control_click();
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close]);
    }

    #[test]
    fn dispatch_routes_by_handler() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.drain_events();

        let flags = ctl.dispatch(
            &mut fx.doc,
            Handler::StopPropagation,
            &InputEvent::Click { target: fx.close },
        );
        assert_eq!(flags, EventFlags::STOP_PROPAGATION);

        ctl.dispatch(
            &mut fx.doc,
            Handler::CloseControlClick,
            &InputEvent::Click { target: fx.close },
        );
        let flags = ctl.dispatch(
            &mut fx.doc,
            Handler::HandleKeyboard,
            &InputEvent::KeyDown {
                target: fx.close,
                key: KeyEvent::escape(),
            },
        );
        assert!(flags.contains(EventFlags::PREVENT_DEFAULT));
        assert_eq!(ctl.drain_events(), vec![DialogEvent::Close, DialogEvent::Close]);

        // Mismatched kinds are ignored.
        let flags = ctl.dispatch(
            &mut fx.doc,
            Handler::BackdropClick,
            &InputEvent::MouseUp { target: fx.backdrop },
        );
        assert!(flags.is_empty());
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn scroll_lock_follows_prop_while_open() {
        let mut fx = fixture();
        fx.doc.set_scroll_lock_style(Some("auto"));
        let mut ctl = open(&mut fx);
        assert!(ctl.holds_scroll_lock());
        assert_eq!(fx.doc.scroll_lock_style().as_deref(), Some("hidden"));

        let props = ctl.props().clone().prevent_background_scrolling(false);
        ctl.update_props(&mut fx.doc, props);
        assert!(!ctl.holds_scroll_lock());
        assert_eq!(fx.doc.scroll_lock_style().as_deref(), Some("auto"));

        let props = ctl.props().clone().prevent_background_scrolling(true);
        ctl.update_props(&mut fx.doc, props);
        assert!(ctl.holds_scroll_lock());

        ctl.set_open(&mut fx.doc, false);
        assert_eq!(fx.doc.scroll_lock_style().as_deref(), Some("auto"));
    }

    #[test]
    fn unmount_is_silent_and_idempotent() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        ctl.unmount(&mut fx.doc);
        ctl.unmount(&mut fx.doc);
        assert!(ctl.drain_events().is_empty());
        assert!(!ctl.is_open());
        assert_eq!(fx.doc.scroll_lock_style(), None);
        assert_eq!(fx.doc.focused(), Some(fx.opener));
        assert_eq!(ctl.anchor(AnchorRole::Dialog), None);
    }

    #[test]
    fn drop_unregisters() {
        let mut fx = fixture();
        let registry = DialogRegistry::new();
        let ctl = DialogController::mount(DialogProps::new(true), registry.clone(), &mut fx.doc);
        assert_eq!(registry.open_count(), 1);
        drop(ctl);
        assert_eq!(registry.open_count(), 0);
        assert_eq!(registry.scroll_lock_count(), 0);
        assert!(registry.reconcile(&mut fx.doc));
        assert_eq!(fx.doc.scroll_lock_style(), None);
    }

    #[test]
    fn detach_clears_anchor() {
        let mut fx = fixture();
        let mut ctl = open(&mut fx);
        assert_eq!(ctl.detach(AnchorRole::Backdrop), Some(fx.backdrop));
        assert_eq!(ctl.anchor(AnchorRole::Backdrop), None);
    }
}
