//! Headless document model
//!
//! The core consumes a [`Document`] plus a window-like environment for
//! computed styles, layout rectangles, scrolling, and synthetic events.
//! In this crate both are provided here: an arena of nodes addressed by
//! [`NodeId`] handles, loaded from HTML via `scraper`, mutated by actions,
//! and observed by snapshots.
//!
//! Hosts embedding the core against a real page replace this module with
//! bindings to their environment; the rest of the crate only relies on the
//! API surface below.

mod event;
mod node;
mod parse;
mod style;

#[cfg(test)]
mod tests;

pub use event::{Event, EventType, Listener, ListenerFn, ListenerId, Modifiers};
pub use node::{ElementData, NodeData, NodeId, Rect};
pub use style::ComputedStyle;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::trace;

pub(crate) use parse::collapse_whitespace;

const EMPTY_CHILDREN: &[NodeId] = &[];

/// Tags that participate in the focus order without an explicit tabindex
const FOCUSABLE_TAGS: &[&str] = &["input", "textarea", "select", "button"];

struct NodeSlot {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A live, mutable document tree with synthetic-event support
pub struct Document {
    nodes: Vec<NodeSlot>,
    root: NodeId,
    title: String,
    url: String,
    scroll_x: f64,
    scroll_y: f64,
    active_element: Option<NodeId>,
    listeners: HashMap<(NodeId, EventType), Vec<(ListenerId, Listener)>>,
    next_listener: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Parse an HTML string into a live document
    #[must_use]
    pub fn parse(html: &str, url: &str) -> Self {
        parse::build(html, url)
    }

    /// Create an empty document containing only the synthetic root
    #[must_use]
    pub fn empty(url: &str) -> Self {
        Self::with_url(url)
    }

    pub(crate) fn with_url(url: &str) -> Self {
        let nodes = vec![NodeSlot {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new("#document")),
        }];
        Self {
            nodes,
            root: NodeId(0),
            title: String::new(),
            url: url.to_string(),
            scroll_x: 0.0,
            scroll_y: 0.0,
            active_element: None,
            listeners: HashMap::new(),
            next_listener: 0,
        }
    }

    /// The synthetic document root
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The document title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the document title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The document URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `<body>` element, if present
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.find_first("body")
    }

    /// First element with the given tag, in document order
    #[must_use]
    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .find(|&n| self.tag(n) == Some(tag))
    }

    /// Node payload for a handle
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index()).map(|slot| &slot.data)
    }

    /// Element payload, if the node is an element
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.node(id) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Mutable element payload
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.index()).map(|slot| &mut slot.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Lowercase tag name of an element node
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Parent node, `None` for the root and for detached subtree roots
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|slot| slot.parent)
    }

    /// Child handles in document order
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map_or(EMPTY_CHILDREN, |slot| slot.children.as_slice())
    }

    /// Pre-order traversal of a subtree, including its root
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// All connected element nodes in document order
    #[must_use]
    pub fn all_elements(&self) -> Vec<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .filter(|&n| self.element(n).is_some())
            .collect()
    }

    /// Append a new empty element under a parent
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        self.append_element_data(parent, ElementData::new(tag))
    }

    /// Append an element with prepared state under a parent
    pub fn append_element_data(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        self.push_node(parent, NodeData::Element(data))
    }

    /// Append a text node under a parent
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push_node(parent, NodeData::Text(text.into()))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeSlot {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        if let Some(slot) = self.nodes.get_mut(parent.index()) {
            slot.children.push(id);
        }
        id
    }

    /// Detach a node (and with it, its subtree) from the tree
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(slot) = self.nodes.get_mut(parent.index()) {
            slot.children.retain(|&c| c != id);
        }
        if let Some(slot) = self.nodes.get_mut(id.index()) {
            slot.parent = None;
        }
        if let Some(active) = self.active_element
            && !self.is_connected(active)
        {
            self.active_element = None;
        }
    }

    /// Whether a node is still reachable from the root
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attribute lookup on an element node
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    /// Whether an element carries an attribute
    #[must_use]
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attr(name))
    }

    /// Set an attribute on an element node
    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute from an element node
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id).is_some_and(|el| el.remove_attr(name))
    }

    /// Concatenated text of all descendant text nodes, in document order
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.subtree(id) {
            if let Some(NodeData::Text(t)) = self.node(n) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace a node's textual content.
    ///
    /// For a text node the string is swapped in place; for an element the
    /// children are detached and replaced with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        let is_element = match self.nodes.get_mut(id.index()).map(|slot| &mut slot.data) {
            Some(NodeData::Text(t)) => {
                *t = text;
                return;
            }
            Some(NodeData::Element(_)) => true,
            None => false,
        };
        if !is_element {
            return;
        }
        let old = self
            .nodes
            .get_mut(id.index())
            .map(|slot| std::mem::take(&mut slot.children))
            .unwrap_or_default();
        for child in old {
            if let Some(slot) = self.nodes.get_mut(child.index()) {
                slot.parent = None;
            }
        }
        self.append_text(id, text);
    }

    /// Current form value of an element
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<String> {
        self.element(id).and_then(|el| el.value.clone())
    }

    /// Set the form value of an element
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.value = Some(value.into());
        }
    }

    /// Checkedness of a checkbox or radio
    #[must_use]
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| el.checked)
    }

    /// Set checkedness directly, without an event sequence
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(el) = self.element_mut(id) {
            el.checked = checked;
        }
    }

    /// Selectedness of an option
    #[must_use]
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| el.selected)
    }

    /// Set selectedness of an option
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(el) = self.element_mut(id) {
            el.selected = selected;
        }
    }

    /// Whether the element carries the `disabled` attribute
    #[must_use]
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.has_attr(id, "disabled")
    }

    /// Computed style derived from the inline `style` and `hidden` attributes
    #[must_use]
    pub fn computed_style(&self, id: NodeId) -> ComputedStyle {
        self.element(id).map_or_else(ComputedStyle::default, |el| {
            style::compute(el.attr("style"), el.has_attr("hidden"))
        })
    }

    /// Client rectangle: the host-supplied layout rect, or a zero rect
    #[must_use]
    pub fn bounding_box(&self, id: NodeId) -> Rect {
        self.element(id).and_then(|el| el.rect).unwrap_or_default()
    }

    /// Supply a layout rectangle for an element (host/test hook)
    pub fn set_layout_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(id) {
            el.rect = Some(rect);
        }
    }

    /// Window scroll offsets
    #[must_use]
    pub fn scroll_position(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    /// Scroll the window to an absolute position
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_x = x.max(0.0);
        self.scroll_y = y.max(0.0);
    }

    /// Scroll the window by a delta
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll_to(self.scroll_x + dx, self.scroll_y + dy);
    }

    /// Scroll an element's own viewport by a delta
    pub fn element_scroll_by(&mut self, id: NodeId, dx: f64, dy: f64) {
        if let Some(el) = self.element_mut(id) {
            el.scroll_x = (el.scroll_x + dx).max(0.0);
            el.scroll_y = (el.scroll_y + dy).max(0.0);
        }
    }

    /// Scroll the window so the element's box starts at the top (block alignment)
    pub fn scroll_into_view(&mut self, id: NodeId) {
        if let Some(rect) = self.element(id).and_then(|el| el.rect) {
            self.scroll_to(self.scroll_x, rect.y);
        }
    }

    /// The currently focused element
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Whether an element can take focus
    #[must_use]
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if el.has_attr("tabindex") || el.has_attr("contenteditable") {
            return true;
        }
        if el.tag == "a" {
            return el.has_attr("href");
        }
        if el.is_input_of_type(&["hidden"]) {
            return false;
        }
        FOCUSABLE_TAGS.contains(&el.tag.as_str())
    }

    /// Move focus to an element, dispatching blur/focus events.
    ///
    /// Returns whether the element ended up focused.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        if self.active_element == Some(id) {
            return true;
        }
        if let Some(previous) = self.active_element.take() {
            self.dispatch(Event::new(EventType::Blur, previous));
        }
        self.active_element = Some(id);
        self.dispatch(Event::new(EventType::Focus, id));
        true
    }

    /// Remove focus from an element if it currently holds it
    pub fn blur(&mut self, id: NodeId) -> bool {
        if self.active_element == Some(id) {
            self.active_element = None;
            self.dispatch(Event::new(EventType::Blur, id));
            true
        } else {
            false
        }
    }

    /// Register a listener for an event type on a node
    pub fn add_event_listener<F>(
        &mut self,
        id: NodeId,
        event_type: EventType,
        callback: F,
    ) -> ListenerId
    where
        F: FnMut(&mut Self, &Event) + Send + 'static,
    {
        let token = ListenerId(self.next_listener);
        self.next_listener += 1;
        let boxed: Box<ListenerFn> = Box::new(callback);
        let listener: Listener = Arc::new(Mutex::new(boxed));
        self.listeners
            .entry((id, event_type))
            .or_default()
            .push((token, listener));
        token
    }

    /// Remove a previously registered listener
    pub fn remove_event_listener(&mut self, token: ListenerId) -> bool {
        let mut removed = false;
        for list in self.listeners.values_mut() {
            let before = list.len();
            list.retain(|(t, _)| *t != token);
            removed |= list.len() != before;
        }
        removed
    }

    /// Dispatch a synthetic event.
    ///
    /// Listeners along the propagation path run first (target upward for
    /// bubbling types), then the default action. Listeners may mutate the
    /// document; the propagation path is fixed at dispatch time.
    pub fn dispatch(&mut self, event: Event) {
        trace!(event = event.event_type.as_str(), "dispatch");
        let path: Vec<NodeId> = if event.event_type.bubbles() {
            let mut chain = vec![event.target];
            let mut current = event.target;
            while let Some(parent) = self.parent(current) {
                chain.push(parent);
                current = parent;
            }
            chain
        } else {
            vec![event.target]
        };

        let mut callbacks: Vec<Listener> = Vec::new();
        for node in &path {
            if let Some(list) = self.listeners.get(&(*node, event.event_type)) {
                callbacks.extend(list.iter().map(|(_, l)| Arc::clone(l)));
            }
        }
        for callback in callbacks {
            if let Ok(mut f) = callback.lock() {
                (*f)(self, &event);
            }
        }

        self.run_default_action(&event);
    }

    /// Built-in behavior after listeners: checkbox toggling and radio groups
    fn run_default_action(&mut self, event: &Event) {
        if event.event_type != EventType::Click {
            return;
        }
        let Some(el) = self.element(event.target) else {
            return;
        };
        if self.is_disabled(event.target) {
            return;
        }
        if el.is_input_of_type(&["checkbox"]) {
            let next = !el.checked;
            self.set_checked(event.target, next);
        } else if el.is_input_of_type(&["radio"]) {
            let group = el.attr("name").map(str::to_string);
            if let Some(name) = group {
                let scope = self.radio_scope(event.target);
                let members: Vec<NodeId> = self
                    .subtree(scope)
                    .into_iter()
                    .filter(|&n| n != event.target)
                    .filter(|&n| {
                        self.element(n).is_some_and(|other| {
                            other.is_input_of_type(&["radio"]) && other.attr("name") == Some(&name)
                        })
                    })
                    .collect();
                for member in members {
                    self.set_checked(member, false);
                }
            }
            self.set_checked(event.target, true);
        }
    }

    /// The radio-group boundary: the nearest ancestor form, else the root
    fn radio_scope(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if self.tag(parent) == Some("form") {
                return parent;
            }
            current = parent;
        }
        self.root
    }
}
