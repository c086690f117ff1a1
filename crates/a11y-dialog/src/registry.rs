#![forbid(unsafe_code)]

//! Shared state for the dialogs of one host.
//!
//! Two pieces of state are document-wide rather than per dialog: which
//! dialogs are currently open (for the `has_siblings` flag of `show`/`hide`)
//! and the background scroll lock. [`DialogRegistry`] owns both so that
//! stacked dialogs never race each other.
//!
//! # Invariants
//!
//! - The open stack holds each instance at most once, in opening order.
//! - `has_siblings` for an instance is "another instance of this registry was
//!   open when it opened".
//! - The scroll lock is reference-counted. The first acquisition saves the
//!   document style and applies [`SCROLL_LOCK_STYLE`]; releasing the last
//!   reference restores the saved value exactly.
//!
//! # Failure Modes
//!
//! - Releasing with no reference held is ignored.
//! - A controller dropped without `unmount` gives its reference back without
//!   access to the document; the style stays applied until the next
//!   release or [`DialogRegistry::reconcile`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::dom::Document;

/// Overflow value applied to the document while scrolling is locked.
pub const SCROLL_LOCK_STYLE: &str = "hidden";

/// Global counter for instance ids.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a mounted dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocate the next id.
    pub(crate) fn next() -> Self {
        Self(INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Open instances, bottom to top.
    open: Vec<InstanceId>,
    scroll_locks: usize,
    /// Document style saved by the first lock. `Some(None)` means "was unset".
    saved_style: Option<Option<String>>,
}

/// Cloneable handle to the shared dialog state of one host.
///
/// Single-threaded (`Rc<RefCell<..>>`), like the document it guards.
#[derive(Clone, Default)]
pub struct DialogRegistry {
    inner: Rc<RefCell<RegistryState>>,
}

impl fmt::Debug for DialogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("DialogRegistry")
            .field("open", &state.open)
            .field("scroll_locks", &state.scroll_locks)
            .finish()
    }
}

impl DialogRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Open stack ---

    /// Number of open dialogs.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.inner.borrow().open.len()
    }

    #[must_use]
    pub fn is_open(&self, id: InstanceId) -> bool {
        self.inner.borrow().open.contains(&id)
    }

    /// The most recently opened dialog still open.
    #[must_use]
    pub fn top(&self) -> Option<InstanceId> {
        self.inner.borrow().open.last().copied()
    }

    /// Open dialogs, bottom to top.
    #[must_use]
    pub fn open_instances(&self) -> Vec<InstanceId> {
        self.inner.borrow().open.clone()
    }

    /// Whether any dialog other than `id` is open.
    #[must_use]
    pub fn has_siblings(&self, id: InstanceId) -> bool {
        self.inner.borrow().open.iter().any(|&other| other != id)
    }

    /// Record `id` as open. Returns whether another instance was already open.
    pub(crate) fn mark_open(&self, id: InstanceId) -> bool {
        let mut state = self.inner.borrow_mut();
        let has_siblings = state.open.iter().any(|&other| other != id);
        if !state.open.contains(&id) {
            state.open.push(id);
        }
        has_siblings
    }

    /// Remove `id` from the open stack. Returns whether it was present.
    pub(crate) fn mark_closed(&self, id: InstanceId) -> bool {
        let mut state = self.inner.borrow_mut();
        match state.open.iter().position(|&other| other == id) {
            Some(index) => {
                state.open.remove(index);
                true
            }
            None => false,
        }
    }

    // --- Scroll lock ---

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.inner.borrow().scroll_locks > 0
    }

    /// Number of outstanding scroll-lock references.
    #[must_use]
    pub fn scroll_lock_count(&self) -> usize {
        self.inner.borrow().scroll_locks
    }

    /// Take one scroll-lock reference, locking the document on the first.
    pub(crate) fn lock_scroll<D: Document>(&self, doc: &mut D) {
        let mut state = self.inner.borrow_mut();
        if state.scroll_locks == 0 {
            // A pending restore from an orphaned lock keeps the first saved style.
            if state.saved_style.is_none() {
                state.saved_style = Some(doc.scroll_lock_style());
            }
            doc.set_scroll_lock_style(Some(SCROLL_LOCK_STYLE));
            debug!(saved = ?state.saved_style, "background scroll locked");
        }
        state.scroll_locks += 1;
    }

    /// Give back one scroll-lock reference, restoring the document on the last.
    pub(crate) fn unlock_scroll<D: Document>(&self, doc: &mut D) {
        let mut state = self.inner.borrow_mut();
        if state.scroll_locks == 0 {
            return;
        }
        state.scroll_locks -= 1;
        if state.scroll_locks == 0 {
            Self::restore(&mut state, doc);
        }
    }

    /// Give back one reference without touching the document.
    pub(crate) fn forget_scroll_lock(&self) {
        let mut state = self.inner.borrow_mut();
        state.scroll_locks = state.scroll_locks.saturating_sub(1);
    }

    /// Restore the document style if no references remain but a lock is still
    /// applied (after a controller was dropped without `unmount`).
    /// Returns whether anything was restored.
    pub fn reconcile<D: Document>(&self, doc: &mut D) -> bool {
        let mut state = self.inner.borrow_mut();
        if state.scroll_locks == 0 && state.saved_style.is_some() {
            Self::restore(&mut state, doc);
            return true;
        }
        false
    }

    fn restore<D: Document>(state: &mut RegistryState, doc: &mut D) {
        if let Some(saved) = state.saved_style.take() {
            doc.set_scroll_lock_style(saved.as_deref());
            debug!(restored = ?saved, "background scroll unlocked");
        }
    }
}
