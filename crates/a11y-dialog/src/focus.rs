#![forbid(unsafe_code)]

//! Focus management inside a dialog box.
//!
//! Three questions are answered here, each against the live [`Document`]:
//!
//! - which descendants of the dialog box take part in the tab order,
//! - which element receives focus when the dialog opens,
//! - where Tab / Shift+Tab go while focus is trapped.
//!
//! # Initial focus priority
//!
//! 1. The element attached as [`crate::AnchorRole::Focus`], if interactive.
//! 2. The first tabbable descendant carrying `autofocus`.
//! 3. The first tabbable descendant.
//! 4. The dialog box itself (it carries `tabindex=-1`).
//!
//! # Invariants
//!
//! - [`tab_target`] always returns the dialog box or one of its tabbable
//!   descendants; focus never leaves the dialog while it is trapped.

use tracing::trace;

use crate::dom::Document;

/// How the initial focus target was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitialFocus {
    FocusRef,
    Autofocus,
    FirstFocusable,
    DialogBox,
}

/// Tabbable descendants of `root`, in document order.
#[must_use]
pub fn focusable_descendants<D: Document>(doc: &D, root: D::Element) -> Vec<D::Element> {
    let mut all = Vec::new();
    doc.descendants(root, &mut all);
    all.retain(|&el| doc.element_info(el).is_some_and(|info| info.is_tabbable()));
    all
}

/// Move focus to the initial target and report which rule picked it.
///
/// Returns `None` when nothing could be focused (no dialog box attached and no
/// usable focus ref).
pub fn focus_initial<D: Document>(
    doc: &mut D,
    dialog: Option<D::Element>,
    focus_ref: Option<D::Element>,
) -> Option<(D::Element, InitialFocus)> {
    if let Some(el) = focus_ref {
        let usable = doc.contains(el) && doc.element_info(el).is_some_and(|i| i.is_interactive());
        if usable && doc.focus(el) {
            return Some((el, InitialFocus::FocusRef));
        }
        trace!(element = ?el, "focus ref not focusable, falling back");
    }

    let dialog = dialog?;
    let candidates = focusable_descendants(doc, dialog);

    let autofocus = candidates
        .iter()
        .copied()
        .find(|&el| doc.element_info(el).is_some_and(|i| i.autofocus));
    if let Some(el) = autofocus
        && doc.focus(el)
    {
        return Some((el, InitialFocus::Autofocus));
    }

    for &el in &candidates {
        if doc.focus(el) {
            return Some((el, InitialFocus::FirstFocusable));
        }
    }

    doc.focus(dialog).then_some((dialog, InitialFocus::DialogBox))
}

/// Where Tab (or Shift+Tab with `backwards`) moves focus inside `dialog`.
///
/// - No tabbable descendants: the dialog box.
/// - Focus on the dialog box or outside it: the first (Tab) or last
///   (Shift+Tab).
/// - Otherwise the next / previous tabbable descendant in document order
///   relative to the focused element (which need not be tabbable itself, e.g.
///   a `tabindex=-1` focus target), wrapping at both ends.
#[must_use]
pub fn tab_target<D: Document>(
    doc: &D,
    dialog: D::Element,
    current: Option<D::Element>,
    backwards: bool,
) -> D::Element {
    let mut all = Vec::new();
    doc.descendants(dialog, &mut all);
    let is_tabbable = |el: &D::Element| doc.element_info(*el).is_some_and(|i| i.is_tabbable());

    let (Some(first), Some(last)) = (
        all.iter().copied().find(is_tabbable),
        all.iter().rev().copied().find(is_tabbable),
    ) else {
        return dialog;
    };

    let Some(index) = current.and_then(|cur| all.iter().position(|&el| el == cur)) else {
        return if backwards { last } else { first };
    };
    if backwards {
        all[..index].iter().rev().copied().find(is_tabbable).unwrap_or(last)
    } else {
        all[index + 1..].iter().copied().find(is_tabbable).unwrap_or(first)
    }
}
