#![forbid(unsafe_code)]

//! In-memory [`Document`] for tests.
//!
//! [`MockDocument`] is an arena of nodes rooted at a `body`. Nodes can be
//! appended, removed (detaching their subtree), and edited; focus follows the
//! same acceptance rules as a browser: only attached nodes that
//! [`ElementInfo::can_receive_focus`] take focus.
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `test-helpers` feature.

use crate::dom::{Document, ElementInfo, ElementKind};

/// Handle to a node of a [`MockDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    info: ElementInfo,
    attached: bool,
}

/// Arena-backed element tree with focus and a scroll-lock style slot.
#[derive(Debug, Clone)]
pub struct MockDocument {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
    scroll_style: Option<String>,
    focus_calls: usize,
}

impl Default for MockDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDocument {
    /// A document holding only `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                info: ElementInfo::new(ElementKind::Generic),
                attached: true,
            }],
            focused: None,
            scroll_style: None,
            focus_calls: 0,
        }
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new child to `parent` and return its handle.
    pub fn append(&mut self, parent: NodeId, info: ElementInfo) -> NodeId {
        let id = NodeId(self.nodes.len());
        let attached = self.node(parent).is_some_and(|p| p.attached);
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            info,
            attached,
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Detach `id` and its subtree from the document. Handles stay valid but
    /// `contains` returns false for them; the subtree keeps its inner
    /// structure and is no longer within any attached ancestor.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.body() {
            return;
        }
        let parent = self.nodes.get_mut(id.0).and_then(|n| n.parent.take());
        if let Some(parent) = parent
            && let Some(p) = self.nodes.get_mut(parent.0)
        {
            p.children.retain(|&child| child != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0) {
                node.attached = false;
                stack.extend(node.children.iter().copied());
            }
        }
        if self.focused.is_some_and(|f| !self.is_attached(f)) {
            self.focused = None;
        }
    }

    /// Replace the focus facts of `id`.
    pub fn set_info(&mut self, id: NodeId, info: ElementInfo) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.info = info;
        }
    }

    /// Mutable access to the focus facts of `id`.
    pub fn info_mut(&mut self, id: NodeId) -> Option<&mut ElementInfo> {
        self.nodes.get_mut(id.0).map(|n| &mut n.info)
    }

    /// Set the value of a text control (what a user typing would do).
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(info) = self.info_mut(id) {
            info.value = value.to_owned();
        }
    }

    /// Force focus onto `id` (or clear it with the body), bypassing the
    /// focusability check. Simulates a user click on an arbitrary element.
    pub fn set_focus(&mut self, id: NodeId) {
        self.focused = (id != self.body()).then_some(id);
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.active_element()
    }

    /// Number of successful `focus` calls so far.
    #[must_use]
    pub fn focus_calls(&self) -> usize {
        self.focus_calls
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.attached)
    }
}

impl Document for MockDocument {
    type Element = NodeId;

    fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.is_attached(id))
    }

    fn focus(&mut self, element: NodeId) -> bool {
        let focusable = self.is_attached(element)
            && self
                .node(element)
                .is_some_and(|n| n.info.can_receive_focus());
        if focusable {
            self.focused = Some(element);
            self.focus_calls += 1;
        }
        focusable
    }

    fn contains(&self, element: NodeId) -> bool {
        self.is_attached(element)
    }

    fn is_within(&self, root: NodeId, element: NodeId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(root) else {
            return;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = self.node(id) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
    }

    fn element_info(&self, element: NodeId) -> Option<ElementInfo> {
        self.node(element).map(|n| n.info.clone())
    }

    fn scroll_lock_style(&self) -> Option<String> {
        self.scroll_style.clone()
    }

    fn set_scroll_lock_style(&mut self, value: Option<&str>) {
        self.scroll_style = value.map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = MockDocument::new();
        let a = doc.append(doc.body(), ElementInfo::default());
        let a1 = doc.append(a, ElementInfo::default());
        let a2 = doc.append(a, ElementInfo::default());
        let b = doc.append(doc.body(), ElementInfo::default());
        let a1x = doc.append(a1, ElementInfo::default());

        let mut out = Vec::new();
        doc.descendants(doc.body(), &mut out);
        assert_eq!(out, vec![a, a1, a1x, a2, b]);

        out.clear();
        doc.descendants(a, &mut out);
        assert_eq!(out, vec![a1, a1x, a2]);
    }

    #[test]
    fn focus_requires_focusable_attached_node() {
        let mut doc = MockDocument::new();
        let div = doc.append(doc.body(), ElementInfo::default());
        let button = doc.append(doc.body(), ElementInfo::new(ElementKind::Button));

        assert!(!doc.focus(div));
        assert!(doc.focus(button));
        assert_eq!(doc.focused(), Some(button));
        assert_eq!(doc.focus_calls(), 1);

        doc.remove(button);
        assert!(!doc.contains(button));
        assert_eq!(doc.focused(), None);
        assert!(!doc.focus(button));
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = MockDocument::new();
        let outer = doc.append(doc.body(), ElementInfo::default());
        let inner = doc.append(outer, ElementInfo::new(ElementKind::Button));
        doc.remove(outer);
        assert!(!doc.contains(inner));
        assert!(doc.is_within(outer, inner));
        assert!(!doc.is_within(doc.body(), outer));

        // Appending under a detached node stays detached.
        let late = doc.append(outer, ElementInfo::new(ElementKind::Button));
        assert!(!doc.contains(late));
    }

    #[test]
    fn set_focus_bypasses_rules() {
        let mut doc = MockDocument::new();
        let div = doc.append(doc.body(), ElementInfo::default());
        doc.set_focus(div);
        assert_eq!(doc.active_element(), Some(div));
        doc.set_focus(doc.body());
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn scroll_style_slot() {
        let mut doc = MockDocument::new();
        assert_eq!(doc.scroll_lock_style(), None);
        doc.set_scroll_lock_style(Some("hidden"));
        assert_eq!(doc.scroll_lock_style().as_deref(), Some("hidden"));
        doc.set_scroll_lock_style(None);
        assert_eq!(doc.scroll_lock_style(), None);
    }
}
